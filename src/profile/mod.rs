// src/profile/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use models::{Profile, SubscriptionTier};
pub use routes::profile_routes;
pub use services::ProfileService;
