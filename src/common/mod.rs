// Common module - shared types and utilities

pub mod config;
pub mod error;
pub mod helpers;
pub mod state;
pub mod validation;

pub use config::AppConfig;
pub use error::ApiError;
pub use helpers::{safe_email_log, safe_token_log};
pub use state::AppState;
pub use validation::{ValidationResult, Validator};
