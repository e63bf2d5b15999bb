// src/payments/webhook.rs
//! Gateway webhook signature check and event parsing

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Hex HMAC-SHA512 of `payload` keyed by the gateway secret
#[cfg(test)]
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison of the header against the expected HMAC
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Ok(provided) = hex::decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);

    mac.verify_slice(&provided).is_ok()
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Option<WebhookData>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl WebhookEvent {
    pub fn reference(&self) -> Option<&str> {
        self.data.as_ref()?.reference.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.data.as_ref()?.status.as_deref()
    }

    /// `data.metadata.user_id`, when the metadata is an object carrying one
    pub fn metadata_user_id(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .metadata
            .as_ref()?
            .get("user_id")?
            .as_str()
    }
}
