//! Transactional mail API client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use thiserror::Error;

/// Configuration for the outbound mail API.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Mail API base address.
    pub base_url: String,

    /// Mail API bearer token.
    pub api_token: String,

    /// Sender address for every outbound message.
    pub from_address: String,

    /// Admin address blind-copied on every confirmation.
    pub admin_address: String,
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[automock]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver one message. Best-effort; the caller decides what a failure
    /// means.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// HTTP client for the transactional mail API.
#[derive(Debug, Clone)]
pub struct MailerClient {
    config: MailerConfig,
    http: Client,
}

impl MailerClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl MailSender for MailerClient {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let url = format!("{}/v1/messages", self.config.base_url);

        let body = serde_json::json!({
            "from": self.config.from_address,
            "to": email.to,
            "bcc": self.config.admin_address,
            "subject": email.subject,
            "html": email.html,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Errors that can occur when communicating with the mail API.
#[derive(Debug, Error)]
pub enum MailerError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail API returned a non-2xx response.
    #[error("unexpected response from mail API: {0}")]
    UnexpectedResponse(String),
}
