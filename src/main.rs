// src/main.rs
use anyhow::Context;
use dotenv::dotenv;
use reqwest::Client;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

use soilguard_api::auth::identity_provider_from_config;
use soilguard_api::build_router;
use soilguard_api::common::config::print_mode_status;
use soilguard_api::common::migrations::run_migrations;
use soilguard_api::common::{AppConfig, AppState};
use soilguard_api::services::{
    monitoring, CompletionModel, GeminiModel, PaymentGateway, PaystackGateway,
};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();

    // Must outlive the server
    let sentry_guard = monitoring::init_sentry(config.sentry_dsn.as_deref());
    monitoring::init_tracing(sentry_guard.is_some());

    print_mode_status(&config);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // COLLABORATORS
    // ========================================================================

    let http_client = Client::builder().build()?;

    let identity = identity_provider_from_config(&config.identity, http_client.clone())
        .context("set SUPABASE_JWT_SECRET, or SUPABASE_URL and SUPABASE_SERVICE_ROLE")?;

    let ai_model = GeminiModel::new(http_client.clone(), &config.ai)
        .ok()
        .map(|model| Arc::new(model) as Arc<dyn CompletionModel>);

    let gateway = PaystackGateway::new(http_client.clone(), &config.paystack)
        .ok()
        .map(|gateway| Arc::new(gateway) as Arc<dyn PaymentGateway>);

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        identity,
        ai_model,
        gateway,
        webhook_secret: config.paystack.secret_key.clone(),
        paystack_public_key: config.paystack.public_key.clone(),
    };

    let shared = Arc::new(RwLock::new(app_state));
    let app = build_router(shared, &config.cors_origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    drop(sentry_guard);
    Ok(())
}
