// src/profile/handlers.rs

use axum::extract::{rejection::JsonRejection, Extension, Json};
use tracing::info;

use super::models::{Profile, SubscriptionSummary, UpdateProfileRequest};
use super::services::ProfileService;
use super::validators::UpdateProfileValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, SharedState, Validator};

/// GET /api/profile - Caller's profile, created on first access
pub async fn profile_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Profile>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = ProfileService::new(state.db);

    let (profile, _) = service.ensure(&authed.id, &authed.email, None).await?;

    Ok(Json(profile))
}

/// PUT /api/profile - Update full_name and/or email
pub async fn update_profile_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Json(request) = payload?;
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "Profile update request received");

    UpdateProfileValidator.validate(&request).into_result()?;

    let service = ProfileService::new(state.db);
    service.ensure(&authed.id, &authed.email, None).await?;
    let profile = service.update_details(&authed.id, &request).await?;

    info!(user_id = %authed.id, "Profile updated successfully");

    Ok(Json(profile))
}

/// GET /api/subscription - Tier summary for gating Pro views
pub async fn subscription_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<SubscriptionSummary>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = ProfileService::new(state.db);

    let summary = match service.find(&authed.id).await? {
        Some(profile) => SubscriptionSummary::from(&profile),
        None => SubscriptionSummary {
            tier: Default::default(),
            subscription_date: None,
            is_pro: false,
            is_free: true,
        },
    };

    Ok(Json(summary))
}
