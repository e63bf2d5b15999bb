// src/profile/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Subscription
// ============================================================================

/// Subscription level. Moves free → pro only; there is no downgrade path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
        }
    }

    pub fn is_pro(&self) -> bool {
        matches!(self, SubscriptionTier::Pro)
    }
}

// ============================================================================
// Profile Models
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub subscription_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Server-side view of the dashboard's subscription predicates
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    pub tier: SubscriptionTier,
    pub subscription_date: Option<String>,
    pub is_pro: bool,
    pub is_free: bool,
}

impl From<&Profile> for SubscriptionSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            tier: profile.subscription_tier,
            subscription_date: profile.subscription_date.clone(),
            is_pro: profile.subscription_tier.is_pro(),
            is_free: !profile.subscription_tier.is_pro(),
        }
    }
}
