//! Bearer token verification against the shared signing secret

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{error, warn};

use super::models::Claims;
use crate::common::{safe_token_log, ApiError};

/// Returns the second space-separated segment of an `Authorization` header value
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    // `exp` and `nbf` are checked when present but not mandatory, with no clock tolerance
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;
    validation
}

/// Verifies the token's signature and expiry and returns its claims
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
}

/// Full credential check for one request
///
/// The secret is checked first so a misconfigured server answers 500 even
/// when the caller sent nothing.
pub fn verify_bearer(header: Option<&str>, secret: Option<&str>) -> Result<Claims, ApiError> {
    let secret = match secret {
        Some(s) if !s.is_empty() => s,
        _ => {
            error!("JWT_SECRET environment variable is not set");
            return Err(ApiError::ServerMisconfigured(
                "Server configuration error.".to_string(),
            ));
        }
    };

    let token = match extract_bearer_token(header) {
        Some(t) => t,
        None => {
            warn!("Authentication failed: missing bearer token");
            return Err(ApiError::Unauthenticated(
                "Access denied. No token provided.".to_string(),
            ));
        }
    };

    decode_claims(token, secret).map_err(|e| {
        warn!(
            error = %e,
            token = %safe_token_log(token),
            "JWT token validation failed"
        );
        ApiError::InvalidToken("Invalid or expired token.".to_string())
    })
}
