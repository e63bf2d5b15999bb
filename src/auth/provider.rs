//! Identity providers: turn a bearer token into `{id, email}`

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::models::{AuthUser, Claims};
use crate::common::config::IdentityConfig;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider not configured")]
    NotConfigured,

    #[error("identity request failed: {0}")]
    RequestFailed(String),

    #[error("invalid identity response: {0}")]
    InvalidResponse(String),
}

/// Resolves access tokens against the managed identity backend.
///
/// `Ok(None)` means the provider answered but did not recognise the token.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_token(&self, token: &str) -> Result<Option<AuthUser>, IdentityError>;
}

/// Verifies HS256 access tokens locally with the project's JWT secret
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        // No `aud` configured, so the token's audience claim is not checked.
        let validation = Validation::new(Algorithm::HS256);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve_token(&self, token: &str) -> Result<Option<AuthUser>, IdentityError> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(Some(AuthUser {
                id: data.claims.sub,
                email: data.claims.email.unwrap_or_default(),
            })),
            Err(e) => {
                debug!(error = %e, "JWT access token rejected");
                Ok(None)
            }
        }
    }
}

/// Asks the managed backend's auth API who owns the token
pub struct RemoteIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteIdentityProvider {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn resolve_token(&self, token: &str) -> Result<Option<AuthUser>, IdentityError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Identity provider returned an error");
            return Err(IdentityError::RequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        if user.id.is_empty() {
            return Ok(None);
        }

        Ok(Some(user))
    }
}

/// Pick the identity provider the configuration allows.
///
/// A JWT secret takes precedence over the remote lookup.
pub fn identity_provider_from_config(
    config: &IdentityConfig,
    client: Client,
) -> Result<Arc<dyn IdentityProvider>, IdentityError> {
    if let Some(secret) = &config.jwt_secret {
        info!("Identity: verifying access tokens with SUPABASE_JWT_SECRET");
        return Ok(Arc::new(JwtIdentityProvider::new(secret)));
    }

    match (&config.supabase_url, &config.service_role_key) {
        (Some(url), Some(key)) => {
            info!(url = %url, "Identity: resolving access tokens remotely");
            Ok(Arc::new(RemoteIdentityProvider::new(client, url, key)))
        }
        _ => Err(IdentityError::NotConfigured),
    }
}
