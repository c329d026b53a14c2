// src/main.rs
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod common;
mod server;
mod users;

use common::config::{apply_cli_override, log_config_status};
use common::{AppConfig, AppState};
use users::PgUserRepository;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = match AppConfig::from_env() {
        Ok(config) => apply_cli_override(config),
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    log_config_status(&config);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Err(e) = server::verify_database(&config.db).await {
        error!(error = ?e, "Failed to connect to database");
        std::process::exit(1);
    }
    info!("Database connection successful");
    let pool = server::connect_pool(&config.db);

    // ========================================================================
    // APPLICATION STATE & ROUTER
    // ========================================================================

    let port = config.port;
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let state = AppState::new(config, users);
    let app = server::build_router(state, None);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    server::serve(app, port, pool).await
}
