//! Payment gateway REST client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::payments::secret::GatewaySecret;

/// Configuration for connecting to the payment gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway API base address, e.g. `"https://api.razorpay.com"`.
    pub base_url: String,

    /// Public key id used as the basic-auth username.
    pub key_id: String,

    /// Key secret used as the basic-auth password and for callback
    /// signature verification.
    pub key_secret: GatewaySecret,
}

/// Order handle opened with the gateway for a given amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a gateway order for `amount` minor units.
    async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
        customer_email: &str,
    ) -> Result<GatewayOrder, GatewayError>;
}

/// HTTP client for the gateway's orders API.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    http: Client,
}

impl GatewayClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    #[must_use]
    pub fn key_secret(&self) -> &GatewaySecret {
        &self.config.key_secret
    }
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
        customer_email: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.base_url);

        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
            "notes": { "email": customer_email },
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "order request failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        Ok(GatewayOrder {
            id: parsed.id,
            amount: parsed.amount,
            currency: parsed.currency,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

/// Errors that can occur when communicating with the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}
