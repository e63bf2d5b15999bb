// src/payments/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed price of the Pro upgrade, in major currency units
pub const PRO_UPGRADE_AMOUNT: f64 = 2999.0;

/// Redirect handle base used when no gateway credentials are configured
pub const MOCK_AUTHORIZATION_BASE: &str = "https://paystack.mock/authorize";

pub const DEFAULT_PUBLIC_KEY: &str = "pk_test_xxx";

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Donation,
    ProUpgrade,
}

impl PaymentType {
    /// `"pro"` and `"pro_upgrade"` select the upgrade; everything else is a donation
    pub fn from_request(kind: Option<&str>) -> Self {
        match kind.map(str::trim) {
            Some("pro") | Some("pro_upgrade") => PaymentType::ProUpgrade,
            _ => PaymentType::Donation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Donation => "donation",
            PaymentType::ProUpgrade => "pro_upgrade",
        }
    }
}

/// `pending` → `success | failed`; terminal states never change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// Result of an explicit verification: anything but `"success"` failed
    pub fn from_verification(gateway_status: &str) -> Self {
        if gateway_status == "success" {
            PaymentStatus::Success
        } else {
            PaymentStatus::Failed
        }
    }

    /// Webhook statuses; non-terminal ones (e.g. `"ongoing"`) map to `None`
    pub fn from_webhook(gateway_status: &str) -> Option<Self> {
        match gateway_status {
            "success" => Some(PaymentStatus::Success),
            "failed" | "abandoned" | "reversed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

// ============================================================================
// Rows and payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRecord {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    pub payment_reference: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InitiatePaymentRequest {
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MockInitiateResponse {
    pub mock: bool,
    pub authorization_url: String,
    pub reference: String,
    pub public_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: PaymentStatus,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

/// Result of a terminal write attempt
#[derive(Debug, Clone)]
pub struct SettleOutcome {
    /// Record as stored after the attempt
    pub record: PaymentRecord,
    /// Whether this call performed the `pending` → terminal transition
    pub transitioned: bool,
    /// Whether this call promoted the owner's profile to pro
    pub promoted: bool,
}

/// Amount in minor currency units as the gateway expects it
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
