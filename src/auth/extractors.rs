//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use tracing::{debug, warn};

use crate::common::{bearer_token, safe_email_log, safe_token_log, ApiError, SharedState};

/// Authenticated caller
///
/// Extracts the bearer token and resolves it through the configured
/// identity provider. Nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<SharedState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let token = match bearer_token(&parts.headers) {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Bearer token");
                return Err(ApiError::Unauthorized("Missing Bearer token".into()));
            }
        };

        let identity = state_lock.read().await.identity.clone();

        match identity.resolve_token(&token).await {
            Ok(Some(user)) => {
                debug!(
                    user_id = %user.id,
                    email = %safe_email_log(&user.email),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    id: user.id,
                    email: user.email,
                })
            }
            Ok(None) => {
                warn!(token = %safe_token_log(&token), "Authentication failed: invalid token");
                Err(ApiError::Unauthorized("Invalid token".into()))
            }
            Err(e) => {
                warn!(error = %e, "Authentication failed: identity provider error");
                Err(ApiError::Unauthorized("Invalid token".into()))
            }
        }
    }
}
