// src/common/config.rs
//! Environment-driven configuration
//!
//! Optional credentials switch collaborators between live and local modes:
//! no `PAYSTACK_SECRET_KEY` means mock payments, no `GOOGLE_AI_API_KEY`
//! means templated AI answers.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub reset_db: bool,
    pub cors_origins: Vec<String>,
    pub identity: IdentityConfig,
    pub ai: AiConfig,
    pub paystack: PaystackConfig,
    pub sentry_dsn: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub supabase_url: Option<String>,
    pub service_role_key: Option<String>,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct PaystackConfig {
    pub secret_key: Option<String>,
    pub public_key: Option<String>,
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            public_key: None,
            base_url: "https://api.paystack.co".to_string(),
        }
    }
}

/// Reads a variable, treating unset and blank values alike
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);

        let database_url =
            non_empty_var("DATABASE_URL").unwrap_or_else(|| "sqlite://soilguard.db".to_string());

        let reset_db = env::var("RESET_DB")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_origins = non_empty_var("CORS_ORIGINS")
            .or_else(|| non_empty_var("FRONTEND_ORIGIN"))
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let identity = IdentityConfig {
            supabase_url: non_empty_var("SUPABASE_URL"),
            service_role_key: non_empty_var("SUPABASE_SERVICE_ROLE"),
            jwt_secret: non_empty_var("SUPABASE_JWT_SECRET"),
        };

        let ai_defaults = AiConfig::default();
        let ai = AiConfig {
            api_key: non_empty_var("GOOGLE_AI_API_KEY"),
            model: non_empty_var("GOOGLE_AI_MODEL").unwrap_or(ai_defaults.model),
            base_url: non_empty_var("GOOGLE_AI_BASE_URL").unwrap_or(ai_defaults.base_url),
        };

        let paystack = PaystackConfig {
            secret_key: non_empty_var("PAYSTACK_SECRET_KEY"),
            public_key: non_empty_var("PAYSTACK_PUBLIC_KEY"),
            base_url: non_empty_var("PAYSTACK_BASE_URL")
                .unwrap_or_else(|| PaystackConfig::default().base_url),
        };

        Self {
            port,
            database_url,
            reset_db,
            cors_origins,
            identity,
            ai,
            paystack,
            sentry_dsn: non_empty_var("SENTRY_DSN"),
        }
    }

    pub fn payments_mock_mode(&self) -> bool {
        self.paystack.secret_key.is_none()
    }
}

/// Print which collaborators run live on startup
pub fn print_mode_status(config: &AppConfig) {
    if config.payments_mock_mode() {
        println!("💳 Payments: MOCK mode (PAYSTACK_SECRET_KEY not set)");
    } else {
        println!("💳 Payments: live gateway at {}", config.paystack.base_url);
    }

    if config.ai.api_key.is_some() {
        println!("🤖 AI: {} via {}", config.ai.model, config.ai.base_url);
    } else {
        println!("🤖 AI: local templates (GOOGLE_AI_API_KEY not set)");
    }
}
