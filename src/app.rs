// src/app.rs
//! Router composition shared by the server binary and the router tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::common::SharedState;
use crate::{ai, land, logging_middleware, payments, profile};

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-paystack-signature"),
        ])
        .allow_credentials(true)
}

/// Every route of the service with its middleware stack
pub fn build_router(shared: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        // ====================================================================
        // LAND ROUTES (CRUD and Pro details)
        // ====================================================================
        .merge(land::land_routes())
        // ====================================================================
        // AI ROUTES (Insights and Chat)
        // ====================================================================
        .merge(ai::ai_routes())
        // ====================================================================
        // PAYMENT ROUTES (Initiate, Verify, Webhook)
        // ====================================================================
        .merge(payments::payments_routes())
        // ====================================================================
        // PROFILE ROUTES (Profile and Subscription)
        // ====================================================================
        .merge(profile::profile_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
