// src/common/config.rs
//! Process configuration, read once from the environment at startup

use sqlx::postgres::PgConnectOptions;
use std::env;
use tracing::{info, warn};

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub user: String,
    pub host: String,
    pub name: String,
    pub password: Option<String>,
    pub port: u16,
}

impl DbConfig {
    /// Discrete connection options for the pool; no URL string is assembled
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub port: u16,
    pub jwt_secret: Option<String>,
    pub require_auth: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            name: env::var("DB_NAME").unwrap_or_else(|_| "postgres".to_string()),
            password: non_empty_var("DB_PASSWORD"),
            port: parse_port("DB_PORT", 5432)?,
        };

        let require_auth = env::var("REQUIRE_AUTH")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self {
            db,
            port: parse_port("PORT", 3000)?,
            jwt_secret: non_empty_var("JWT_SECRET"),
            require_auth,
        })
    }

    /// The secret used to verify bearer tokens, if one is configured
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_port(key: &str, default: u16) -> anyhow::Result<u16> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("{} must be a valid port number, got '{}': {}", key, raw, e)),
        _ => Ok(default),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// CLI argument parsing for the authentication variant
pub fn parse_auth_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    let mut choice = None;
    for arg in args {
        match arg.as_str() {
            "--require-auth" => choice = Some(true),
            "--no-auth" => choice = Some(false),
            _ => {}
        }
    }
    choice
}

/// Override the authentication variant from CLI args
pub fn apply_cli_override(mut config: AppConfig) -> AppConfig {
    if let Some(require_auth) = parse_auth_args(env::args().skip(1)) {
        info!(require_auth, "CLI override: REQUIRE_AUTH");
        config.require_auth = require_auth;
    }
    config
}

/// Log the effective configuration on startup
pub fn log_config_status(config: &AppConfig) {
    info!(
        db_host = %config.db.host,
        db_port = config.db.port,
        db_name = %config.db.name,
        db_user = %config.db.user,
        port = config.port,
        "Configuration loaded"
    );

    if config.require_auth {
        if config.jwt_secret.is_none() {
            warn!("🔒 Authentication required but JWT_SECRET is not set; protected routes will fail");
        } else {
            info!("🔒 Authentication required on /api/users");
        }
    } else {
        warn!("🔓 Authentication disabled; /api/users is open");
    }
}
