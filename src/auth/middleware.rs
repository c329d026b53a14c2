//! Route gate for protected endpoints

use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::models::AuthedUser;
use super::verifier::verify_bearer;
use crate::common::{ApiError, AppState};

/// Rejects the request unless it carries a valid bearer token; on success the
/// claims are stored in the request extensions as [`AuthedUser`].
pub async fn authenticate_token(
    Extension(state): Extension<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims = verify_bearer(header, state.config.jwt_secret())?;

    debug!(
        subject = claims.subject().unwrap_or("<none>"),
        "Bearer token accepted"
    );

    request.extensions_mut().insert(AuthedUser { claims });
    Ok(next.run(request).await)
}
