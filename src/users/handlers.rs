// src/users/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::models::{CreateUserRequest, User};
use super::validators::CreateUserValidator;
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState};

fn subject(authed: &Option<Extension<AuthedUser>>) -> &str {
    authed
        .as_ref()
        .and_then(|Extension(user)| user.claims.subject())
        .unwrap_or("<anonymous>")
}

/// GET /api/users - List all users
pub async fn list_users(
    Extension(state): Extension<Arc<AppState>>,
    authed: Option<Extension<AuthedUser>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(|e| ApiError::storage("An error occurred while fetching users", e))?;

    debug!(count = users.len(), subject = subject(&authed), "Listed users");
    Ok(Json(users))
}

/// POST /api/users - Create a user
///
/// # Request Body
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com" }
/// ```
pub async fn create_user(
    Extension(state): Extension<Arc<AppState>>,
    authed: Option<Extension<AuthedUser>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed user payload");
        ApiError::InvalidInput(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let new_user = CreateUserValidator.check(&payload)?;

    let user = state
        .users
        .create_user(&new_user.name, &new_user.email)
        .await
        .map_err(|e| ApiError::storage("An error occurred while creating the user", e))?;

    info!(
        user_id = user.id,
        email = %safe_email_log(&user.email),
        subject = subject(&authed),
        "User created"
    );
    Ok(Json(user))
}
