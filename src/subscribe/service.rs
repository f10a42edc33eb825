use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use thiserror::Error;

use crate::subscribe::backup::SubscriberLog;
use crate::subscribe::provider::{MailingListProvider, ProviderError, ProviderOutcome};
use crate::subscribe::validate::{normalize_email, validate_email};
use crate::utils::error::SiteError;

#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Could not record subscription: {0}")]
    Log(#[from] SiteError),

    #[error("Subscription failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Validates, logs and forwards waitlist sign-ups
#[derive(Clone)]
pub struct SubscriptionService {
    log: SubscriberLog,
    provider: Arc<dyn MailingListProvider>,
}

impl SubscriptionService {
    pub fn new(log: SubscriberLog, provider: Arc<dyn MailingListProvider>) -> Self {
        SubscriptionService { log, provider }
    }

    /// Accept a raw form value. Invalid addresses are rejected before anything
    /// is written or sent; "already subscribed" counts as success.
    pub async fn subscribe(
        &self,
        raw_email: &str,
        at: DateTime<Utc>,
    ) -> Result<ProviderOutcome, SubscribeError> {
        let email = normalize_email(raw_email);
        if email.is_empty() || !validate_email(&email) {
            return Err(SubscribeError::InvalidEmail);
        }

        self.log.append(&email, at)?;

        match self.provider.add_subscriber(&email).await {
            Ok(ProviderOutcome::AlreadySubscribed) => {
                info!("{} is already subscribed", email);
                Ok(ProviderOutcome::AlreadySubscribed)
            }
            Ok(outcome) => {
                info!("Subscribed {}", email);
                Ok(outcome)
            }
            Err(e) => {
                warn!("Mailing list error for {}: {}", email, e);
                Err(e.into())
            }
        }
    }
}
