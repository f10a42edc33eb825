use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// What the mailing-list provider did with an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOutcome {
    Added,
    AlreadySubscribed,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("mailing list request failed: {0}")]
    Transport(String),

    #[error("mailing list rejected the address ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("mailing list is misconfigured: {0}")]
    Config(String),
}

/// A mailing list that new subscribers are forwarded to
#[async_trait]
pub trait MailingListProvider: Send + Sync {
    async fn add_subscriber(&self, email: &str) -> Result<ProviderOutcome, ProviderError>;
}

/// Used when no provider is configured; the local log is the only record
#[derive(Debug, Clone, Default)]
pub struct LogOnlyProvider;

#[async_trait]
impl MailingListProvider for LogOnlyProvider {
    async fn add_subscriber(&self, email: &str) -> Result<ProviderOutcome, ProviderError> {
        info!("No mailing list configured; recorded {} locally only", email);
        Ok(ProviderOutcome::Added)
    }
}

/// Mailchimp marketing API (v3) audience members
#[derive(Debug, Clone)]
pub struct MailchimpProvider {
    client: reqwest::Client,
    api_key: String,
    list_id: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct MailchimpError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

const MEMBER_EXISTS: &str = "Member Exists";

impl MailchimpProvider {
    /// The datacenter (`us21`) is the API key's suffix after the last `-`
    pub fn new(api_key: &str, list_id: &str) -> Result<Self, ProviderError> {
        let dc = api_key
            .rsplit_once('-')
            .map(|(_, dc)| dc)
            .filter(|dc| !dc.is_empty())
            .ok_or_else(|| ProviderError::Config("API key has no datacenter suffix".to_string()))?;

        Ok(Self::with_endpoint(
            api_key,
            list_id,
            &format!("https://{}.api.mailchimp.com/3.0", dc),
        ))
    }

    pub fn with_endpoint(api_key: &str, list_id: &str, endpoint: &str) -> Self {
        MailchimpProvider {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            list_id: list_id.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn members_url(&self) -> String {
        format!("{}/lists/{}/members", self.endpoint, self.list_id)
    }
}

/// Map a non-success provider response to an outcome
fn classify_error(status: u16, body: &str) -> Result<ProviderOutcome, ProviderError> {
    let parsed: Option<MailchimpError> = serde_json::from_str(body).ok();
    match parsed {
        Some(err) if err.title == MEMBER_EXISTS => Ok(ProviderOutcome::AlreadySubscribed),
        Some(err) => Err(ProviderError::Rejected {
            status,
            detail: if err.detail.is_empty() { err.title } else { err.detail },
        }),
        None => Err(ProviderError::Rejected { status, detail: body.to_string() }),
    }
}

#[async_trait]
impl MailingListProvider for MailchimpProvider {
    async fn add_subscriber(&self, email: &str) -> Result<ProviderOutcome, ProviderError> {
        debug!("Adding {} to list {}", email, self.list_id);
        let response = self
            .client
            .post(self.members_url())
            .basic_auth("sitepress", Some(&self.api_key))
            .json(&json!({ "email_address": email, "status": "subscribed" }))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(ProviderOutcome::Added);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        classify_error(status.as_u16(), &body)
    }
}
