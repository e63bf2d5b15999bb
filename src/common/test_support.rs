//! Test doubles for the external collaborators and a router harness

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::auth::{AuthUser, IdentityError, IdentityProvider};
use crate::build_router;
use crate::common::migrations::run_migrations;
use crate::common::{AppState, SharedState};
use crate::services::{
    AiError, CompletionModel, GatewayError, InitializeTransaction, PaymentGateway,
};

pub const ALICE_TOKEN: &str = "token-alice";
pub const ALICE_ID: &str = "user-alice";
pub const ALICE_EMAIL: &str = "alice@example.com";
pub const BOB_TOKEN: &str = "token-bob";
pub const BOB_ID: &str = "user-bob";
pub const BOB_EMAIL: &str = "bob@example.com";
pub const WEBHOOK_SECRET: &str = "sk_test_secret";

/// Fresh in-memory database. One connection so every query sees the same db.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool, false).await.unwrap();
    pool
}

// ============================================================================
// Identity
// ============================================================================

pub struct FakeIdentity {
    users: HashMap<String, AuthUser>,
    fail: bool,
}

impl FakeIdentity {
    /// Knows Alice and Bob
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            ALICE_TOKEN.to_string(),
            AuthUser {
                id: ALICE_ID.to_string(),
                email: ALICE_EMAIL.to_string(),
            },
        );
        users.insert(
            BOB_TOKEN.to_string(),
            AuthUser {
                id: BOB_ID.to_string(),
                email: BOB_EMAIL.to_string(),
            },
        );
        Self { users, fail: false }
    }

    /// Every lookup errors, as if the backend were unreachable
    pub fn unreachable() -> Self {
        Self {
            users: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn resolve_token(&self, token: &str) -> Result<Option<AuthUser>, IdentityError> {
        if self.fail {
            return Err(IdentityError::RequestFailed("connection refused".into()));
        }
        Ok(self.users.get(token).cloned())
    }
}

// ============================================================================
// Completion model
// ============================================================================

pub enum ModelBehavior {
    Reply(String),
    InvalidKey,
    Fail(String),
}

pub struct FakeModel {
    behavior: ModelBehavior,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn new(behavior: ModelBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.behavior {
            ModelBehavior::Reply(text) => Ok(text.clone()),
            ModelBehavior::InvalidKey => Err(AiError::InvalidApiKey),
            ModelBehavior::Fail(message) => Err(AiError::RequestFailed(message.clone())),
        }
    }
}

// ============================================================================
// Payment gateway
// ============================================================================

/// Records every call and whether the pending row existed when it arrived
pub struct FakeGateway {
    db: SqlitePool,
    verify_status: Mutex<String>,
    fail_initialize: bool,
    fail_verify: bool,
    pub initialized: Mutex<Vec<InitializeTransaction>>,
    pub pending_seen_at_initialize: Mutex<Vec<bool>>,
    pub verified: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            verify_status: Mutex::new("success".to_string()),
            fail_initialize: false,
            fail_verify: false,
            initialized: Mutex::new(Vec::new()),
            pending_seen_at_initialize: Mutex::new(Vec::new()),
            verified: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    pub fn failing_verify(mut self) -> Self {
        self.fail_verify = true;
        self
    }

    pub fn set_verify_status(&self, status: &str) {
        *self.verify_status.lock().unwrap() = status.to_string();
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn initialize(&self, request: &InitializeTransaction) -> Result<Value, GatewayError> {
        let pending: Option<(String,)> = sqlx::query_as(
            "SELECT payment_status FROM payments WHERE payment_reference = ?",
        )
        .bind(&request.reference)
        .fetch_optional(&self.db)
        .await
        .unwrap();
        self.pending_seen_at_initialize
            .lock()
            .unwrap()
            .push(matches!(pending, Some((ref s,)) if s == "pending"));
        self.initialized.lock().unwrap().push(request.clone());

        if self.fail_initialize {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "Invalid key".into(),
            });
        }

        Ok(json!({
            "authorization_url": format!("https://checkout.test/{}", request.reference),
            "access_code": "ac_test",
            "reference": request.reference,
        }))
    }

    async fn verify(&self, reference: &str) -> Result<String, GatewayError> {
        self.verified.lock().unwrap().push(reference.to_string());
        if self.fail_verify {
            return Err(GatewayError::RequestFailed("timeout".into()));
        }
        Ok(self.verify_status.lock().unwrap().clone())
    }
}

// ============================================================================
// Router harness
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: SharedState,
    pub db: SqlitePool,
}

impl TestApp {
    /// Mock payments, local AI templates, Alice and Bob known to identity
    pub async fn new() -> Self {
        let db = test_pool().await;
        Self::with_state(AppState {
            db,
            identity: Arc::new(FakeIdentity::new()),
            ai_model: None,
            gateway: None,
            webhook_secret: None,
            paystack_public_key: None,
        })
    }

    pub fn with_state(state: AppState) -> Self {
        let db = state.db.clone();
        let state: SharedState = Arc::new(RwLock::new(state));
        let router = build_router(state.clone(), &["http://localhost:5173".to_string()]);
        Self { router, state, db }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes)
    }

    /// JSON request with an optional bearer token; the body is parsed as JSON
    /// (or `Value::Null` when empty or not JSON)
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, bytes) = self.send(request).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
