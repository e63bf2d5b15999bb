// src/land/routes.rs

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers;

/// # Routes
/// - `GET /api/land`, `POST /api/land` - List / create the caller's plots
/// - `PUT /api/land/:id`, `DELETE /api/land/:id` - Owner-only mutation
/// - `GET /api/land/:id/{images,documents,crops}` - Pro-only detail reads
pub fn land_routes() -> Router {
    Router::new()
        .route(
            "/api/land",
            get(handlers::list_land).post(handlers::create_land),
        )
        .route(
            "/api/land/:id",
            put(handlers::update_land).delete(handlers::delete_land),
        )
        .route("/api/land/:id/images", get(handlers::land_images))
        .route("/api/land/:id/documents", get(handlers::land_documents))
        .route("/api/land/:id/crops", get(handlers::land_crops))
}
