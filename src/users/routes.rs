// src/users/routes.rs

use axum::{middleware, routing::get, Router};

use super::handlers;
use crate::auth::authenticate_token;

/// Creates the users router
///
/// # Routes
/// - `GET /api/users` - List users
/// - `POST /api/users` - Create a user
///
/// When `require_auth` is set every route is gated by bearer token verification.
pub fn users_routes(require_auth: bool) -> Router {
    let router = Router::new().route(
        "/api/users",
        get(handlers::list_users).post(handlers::create_user),
    );

    if require_auth {
        router.route_layer(middleware::from_fn(authenticate_token))
    } else {
        router
    }
}
