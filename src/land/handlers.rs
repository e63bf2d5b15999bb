// src/land/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Path},
    http::StatusCode,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::models::{
    CreateLandRequest, CropTracking, LandDocument, LandImage, LandRecord, UpdateLandRequest,
};
use super::services::LandService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, SharedState};
use crate::profile::ProfileService;

/// GET /api/land - Caller's plots, newest first
pub async fn list_land(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Vec<LandRecord>>, ApiError> {
    let state = state_lock.read().await.clone();
    let rows = LandService::new(state.db).list(&authed.id).await?;

    Ok(Json(rows))
}

/// POST /api/land - Create a plot owned by the caller
pub async fn create_land(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    payload: Result<Json<CreateLandRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LandRecord>), ApiError> {
    let Json(request) = payload?;
    let state = state_lock.read().await.clone();
    let row = LandService::new(state.db).create(&authed.id, request).await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/land/:id - Owner-only partial update
pub async fn update_land(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(land_id): Path<String>,
    payload: Result<Json<UpdateLandRequest>, JsonRejection>,
) -> Result<Json<LandRecord>, ApiError> {
    let Json(request) = payload?;
    let state = state_lock.read().await.clone();
    let row = LandService::new(state.db)
        .update(&land_id, &authed.id, request)
        .await?;

    Ok(Json(row))
}

/// DELETE /api/land/:id - Owner-only delete
pub async fn delete_land(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(land_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();
    LandService::new(state.db)
        .delete(&land_id, &authed.id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// Owner check followed by the Pro tier check
async fn authorize_pro_details(
    state: &AppState,
    land_id: &str,
    authed: &AuthedUser,
) -> Result<LandService, ApiError> {
    let service = LandService::new(state.db.clone());
    service.authorize(land_id, &authed.id).await?;

    let tier = ProfileService::new(state.db.clone()).tier(&authed.id).await?;
    if !tier.is_pro() {
        warn!(user_id = %authed.id, land_id = %land_id, "Pro land details requested by free user");
        return Err(ApiError::Forbidden("Pro subscription required".into()));
    }

    info!(user_id = %authed.id, land_id = %land_id, "Serving Pro land details");

    Ok(service)
}

/// GET /api/land/:id/images
pub async fn land_images(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(land_id): Path<String>,
) -> Result<Json<Vec<LandImage>>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = authorize_pro_details(&state, &land_id, &authed).await?;

    Ok(Json(service.images(&land_id).await?))
}

/// GET /api/land/:id/documents
pub async fn land_documents(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(land_id): Path<String>,
) -> Result<Json<Vec<LandDocument>>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = authorize_pro_details(&state, &land_id, &authed).await?;

    Ok(Json(service.documents(&land_id).await?))
}

/// GET /api/land/:id/crops
pub async fn land_crops(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(land_id): Path<String>,
) -> Result<Json<Vec<CropTracking>>, ApiError> {
    let state = state_lock.read().await.clone();
    let service = authorize_pro_details(&state, &land_id, &authed).await?;

    Ok(Json(service.crops(&land_id).await?))
}
