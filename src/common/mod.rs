// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod helpers;
pub mod id_generator;
pub mod migrations;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::ApiError;
pub use helpers::{bearer_token, safe_email_log, safe_token_log, utc_timestamp};
pub use id_generator::*;
pub use state::AppState;
pub use validation::{ValidationError, ValidationResult, Validator};

/// Shared handle passed to handlers through `Extension`
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<AppState>>;
