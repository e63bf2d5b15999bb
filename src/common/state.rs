// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::services::{CompletionModel, PaymentGateway};

/// Application state: row store, collaborator handles and payment keys.
///
/// `ai_model` and `gateway` are `None` when their credentials are absent,
/// which selects local templates and mock payments respectively.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub identity: Arc<dyn IdentityProvider>,
    pub ai_model: Option<Arc<dyn CompletionModel>>,
    pub gateway: Option<Arc<dyn PaymentGateway>>,
    pub webhook_secret: Option<String>,
    pub paystack_public_key: Option<String>,
}
