//! SoilGuard API: land records, soil insights, payments and subscriptions
//! for the SoilGuard web client.

pub mod ai;
pub mod app;
pub mod auth;
pub mod common;
pub mod land;
pub mod logging_middleware;
pub mod payments;
pub mod profile;
pub mod services;

pub use app::build_router;
