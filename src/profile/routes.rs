// src/profile/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// # Routes
/// - `GET /api/profile` - Caller's profile
/// - `PUT /api/profile` - Update full_name / email
/// - `GET /api/subscription` - Tier summary
pub fn profile_routes() -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::profile_handler).put(handlers::update_profile_handler),
        )
        .route("/api/subscription", get(handlers::subscription_handler))
}
