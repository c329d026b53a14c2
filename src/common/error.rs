// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use super::validation::ValidationResult;

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Server misconfigured: {0}")]
    ServerMisconfigured(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {message}: {source}")]
    StorageError {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Wraps a database failure with the message shown to the caller
    pub fn storage(message: impl Into<String>, source: sqlx::Error) -> Self {
        ApiError::StorageError {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken(_) => StatusCode::FORBIDDEN,
            ApiError::ServerMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::InvalidToken(_) => "INVALID_TOKEN",
            ApiError::ServerMisconfigured(_) => "SERVER_MISCONFIGURED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::StorageError { .. } => "STORAGE_ERROR",
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let code = self.code();

        let error_message = match self {
            ApiError::Unauthenticated(msg)
            | ApiError::InvalidToken(msg)
            | ApiError::ServerMisconfigured(msg)
            | ApiError::InvalidInput(msg) => msg,
            ApiError::StorageError { message, source } => {
                error!(error = %source, "Database error occurred");
                message
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Converts a failed ValidationResult into an InvalidInput error
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        let error_messages: Vec<String> = result
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        ApiError::InvalidInput(error_messages.join(", "))
    }
}
