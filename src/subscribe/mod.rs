//! Waitlist sign-ups: address validation, the local CSV backup and the
//! mailing-list provider the address is forwarded to.

mod backup;
mod provider;
mod service;
mod validate;

use std::sync::Arc;

use crate::config::SiteConfig;

pub use backup::SubscriberLog;
pub use provider::{LogOnlyProvider, MailchimpProvider, MailingListProvider, ProviderOutcome};
pub use service::{SubscribeError, SubscriptionService};

#[cfg(test)]
pub use provider::ProviderError;

/// Pick the provider the configuration asks for
pub fn provider_from_config(config: &SiteConfig) -> Arc<dyn MailingListProvider> {
    let ml = &config.mailing_list;
    match (ml.api_key.as_deref(), ml.list_id.as_deref()) {
        (Some(key), Some(list)) if ml.is_configured() => match MailchimpProvider::new(key, list) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                log::warn!("{}; falling back to local log only", e);
                Arc::new(LogOnlyProvider)
            }
        },
        _ => Arc::new(LogOnlyProvider),
    }
}

/// Subscription service wired from configuration
pub fn service_from_config(config: &SiteConfig) -> SubscriptionService {
    let backup = SubscriberLog::new(config.subscriber_log_path());
    log::info!("Recording subscribers in {}", backup.path().display());
    SubscriptionService::new(backup, provider_from_config(config))
}
