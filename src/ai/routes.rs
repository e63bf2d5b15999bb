// src/ai/routes.rs

use axum::{routing::post, Router};

use super::handlers;

/// # Routes
/// - `POST /api/ai/insights` - Soil insights for a pH / moisture / crop reading
/// - `POST /api/ai/chat` - Assistant reply to a free-text message
pub fn ai_routes() -> Router {
    Router::new()
        .route("/api/ai/insights", post(handlers::insights_handler))
        .route("/api/ai/chat", post(handlers::chat_handler))
}
