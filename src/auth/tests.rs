//! Tests for auth module
//!
//! These tests verify:
//! - Local JWT verification of access tokens
//! - Remote token lookup against the identity backend's user endpoint
//! - The `AuthedUser` extractor's 401 responses

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::config::IdentityConfig;
    use crate::common::test_support::{TestApp, ALICE_ID, ALICE_TOKEN};
    use crate::common::AppState;
    use axum::{
        http::{HeaderMap, Method, StatusCode},
        routing::get,
        Json, Router,
    };
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn token_for(sub: &str, email: Option<&str>, exp: usize, secret: &str) -> String {
        let claims = models::Claims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            exp,
            role: Some("authenticated".to_string()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn test_jwt_provider_accepts_valid_token() {
        let provider = JwtIdentityProvider::new(SECRET);
        let token = token_for("user-1", Some("farmer@example.com"), far_future(), SECRET);

        let user = provider.resolve_token(&token).await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "farmer@example.com");
    }

    #[tokio::test]
    async fn test_jwt_provider_accepts_audience_claim() {
        let provider = JwtIdentityProvider::new(SECRET);
        let claims = json!({
            "sub": "user-3",
            "email": "aud@example.com",
            "exp": far_future(),
            "aud": "authenticated",
            "role": "authenticated",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let user = provider.resolve_token(&token).await.unwrap().unwrap();
        assert_eq!(user.id, "user-3");
    }

    #[tokio::test]
    async fn test_jwt_provider_missing_email_defaults_empty() {
        let provider = JwtIdentityProvider::new(SECRET);
        let token = token_for("user-2", None, far_future(), SECRET);

        let user = provider.resolve_token(&token).await.unwrap().unwrap();
        assert_eq!(user.email, "");
    }

    #[tokio::test]
    async fn test_jwt_provider_rejects_bad_tokens() {
        let provider = JwtIdentityProvider::new(SECRET);

        let wrong_secret = token_for("user-1", None, far_future(), "another-secret");
        assert!(provider.resolve_token(&wrong_secret).await.unwrap().is_none());

        let expired = token_for("user-1", None, 1_000_000, SECRET);
        assert!(provider.resolve_token(&expired).await.unwrap().is_none());

        assert!(provider.resolve_token("not-a-jwt").await.unwrap().is_none());
    }

    #[test]
    fn test_provider_selection() {
        let client = reqwest::Client::new();

        let none = IdentityConfig::default();
        assert!(matches!(
            identity_provider_from_config(&none, client.clone()),
            Err(IdentityError::NotConfigured)
        ));

        let url_only = IdentityConfig {
            supabase_url: Some("https://project.supabase.co".into()),
            ..Default::default()
        };
        assert!(identity_provider_from_config(&url_only, client.clone()).is_err());

        let remote = IdentityConfig {
            supabase_url: Some("https://project.supabase.co".into()),
            service_role_key: Some("service-role".into()),
            jwt_secret: None,
        };
        assert!(identity_provider_from_config(&remote, client.clone()).is_ok());

        let jwt = IdentityConfig {
            jwt_secret: Some(SECRET.into()),
            ..Default::default()
        };
        assert!(identity_provider_from_config(&jwt, client).is_ok());
    }

    /// Minimal stand-in for the backend's `GET /auth/v1/user`
    async fn spawn_identity_backend() -> String {
        async fn user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
            let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok());

            match (api_key, auth) {
                (Some("service-role"), Some("Bearer good-token")) => (
                    StatusCode::OK,
                    Json(json!({ "id": "remote-user", "email": "remote@example.com", "aud": "authenticated" })),
                ),
                (Some("service-role"), Some("Bearer broken-token")) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "msg": "boom" })),
                ),
                _ => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))),
            }
        }

        let app = Router::new().route("/auth/v1/user", get(user));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_remote_provider_lookup() {
        let base = spawn_identity_backend().await;
        let provider = RemoteIdentityProvider::new(
            reqwest::Client::builder().no_proxy().build().unwrap(),
            &base,
            "service-role",
        );

        let user = provider.resolve_token("good-token").await.unwrap().unwrap();
        assert_eq!(user.id, "remote-user");
        assert_eq!(user.email, "remote@example.com");

        assert!(provider.resolve_token("stale-token").await.unwrap().is_none());

        assert!(matches!(
            provider.resolve_token("broken-token").await,
            Err(IdentityError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let app = TestApp::new().await;

        let (status, body) = app.call(Method::GET, "/api/land", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing Bearer token");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_protected_route_with_unknown_token() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(Method::GET, "/api/land", Some("who-knows"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_unreachable_identity_backend_is_unauthorized() {
        let db = crate::common::test_support::test_pool().await;
        let app = TestApp::with_state(AppState {
            db,
            identity: Arc::new(crate::common::test_support::FakeIdentity::unreachable()),
            ai_model: None,
            gateway: None,
            webhook_secret: None,
            paystack_public_key: None,
        });

        let (status, body) = app
            .call(Method::GET, "/api/land", Some(ALICE_TOKEN), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let app = TestApp::new().await;

        let (status, body) = app
            .call(Method::GET, "/api/profile", Some(ALICE_TOKEN), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], ALICE_ID);
    }
}
