//! # Payments Module
//!
//! Donations and the Pro upgrade. Every payment starts as a `pending` row and
//! is moved to a terminal status exactly once, either by the verify endpoint
//! or by a signed gateway webhook. A successful upgrade promotes the owner's
//! profile. Without gateway credentials the module runs in mock mode.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod webhook;


pub use models::{PaymentRecord, PaymentStatus, PaymentType};
pub use routes::payments_routes;
pub use services::PaymentService;
