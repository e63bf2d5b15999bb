//! # Land Module
//!
//! Land plot records owned by a single user, with an ownership check before
//! every mutation, plus read-only Pro-tier details (images, documents,
//! crop tracking).

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::LandRecord;
pub use routes::land_routes;
pub use services::LandService;
