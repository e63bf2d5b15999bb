// src/payments/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// # Routes
/// - `GET /api/payments` - Caller's payment history
/// - `POST /api/payments/initiate` - Create a pending payment and start checkout
/// - `GET /api/payments/verify/:ref` - Settle a payment from the gateway's verdict
/// - `POST /api/payments/webhook` - Signed gateway notifications (no bearer token)
pub fn payments_routes() -> Router {
    Router::new()
        .route("/api/payments", get(handlers::list_payments))
        .route("/api/payments/initiate", post(handlers::initiate_payment))
        .route("/api/payments/verify/:ref", get(handlers::verify_payment))
        .route("/api/payments/webhook", post(handlers::payment_webhook))
}
