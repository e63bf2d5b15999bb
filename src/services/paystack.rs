// src/services/paystack.rs
//! Payment gateway client (Paystack transaction API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::common::config::PaystackConfig;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("payment gateway not configured")]
    NotConfigured,

    #[error("gateway request failed: {0}")]
    RequestFailed(String),

    #[error("gateway rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Parameters for opening a transaction at the gateway
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InitializeTransaction {
    /// Amount in minor currency units
    pub amount: i64,
    pub email: String,
    pub reference: String,
    pub metadata: Value,
}

/// Allocates and checks transactions at a payment processor
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Returns the gateway's redirect/authorization payload verbatim
    async fn initialize(&self, request: &InitializeTransaction) -> Result<Value, GatewayError>;

    /// Returns the gateway-reported transaction status, e.g. `"success"`
    async fn verify(&self, reference: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct PaystackEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug)]
pub struct PaystackGateway {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl PaystackGateway {
    pub fn new(client: Client, config: &PaystackConfig) -> Result<Self, GatewayError> {
        let secret_key = config
            .secret_key
            .clone()
            .ok_or(GatewayError::NotConfigured)?;

        Ok(Self {
            client,
            secret_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn read_envelope(response: reqwest::Response) -> Result<PaystackEnvelope, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Paystack request failed");
            let message = serde_json::from_str::<PaystackEnvelope>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(&self, request: &InitializeTransaction) -> Result<Value, GatewayError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        debug!(reference = %request.reference, amount = request.amount, "Initializing transaction");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let envelope = Self::read_envelope(response).await?;

        envelope
            .data
            .ok_or_else(|| GatewayError::InvalidResponse("missing data".to_string()))
    }

    async fn verify(&self, reference: &str) -> Result<String, GatewayError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::RequestFailed("invalid base url".to_string()))?
            .pop_if_empty()
            .extend(["transaction", "verify", reference]);

        debug!(reference = %reference, "Verifying transaction");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let envelope = Self::read_envelope(response).await?;

        let status = envelope
            .data
            .as_ref()
            .and_then(|d| d.get("status"))
            .and_then(Value::as_str)
            .unwrap_or("failed")
            .to_string();

        Ok(status)
    }
}
