//! # Auth Module
//!
//! Bearer-token authentication delegated to the managed identity backend:
//! - `IdentityProvider` implementations (local JWT check or remote lookup)
//! - `AuthedUser` extractor for protected routes

pub mod extractors;
pub mod models;
pub mod provider;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::AuthUser;
pub use provider::{
    identity_provider_from_config, IdentityError, IdentityProvider, JwtIdentityProvider,
    RemoteIdentityProvider,
};
