//! # AI Module
//!
//! Builds natural-language prompts from soil readings or chat messages and
//! forwards them to the configured completion model, or answers from local
//! templates when no model is configured.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod routes;


pub use routes::ai_routes;
