// src/server.rs
//! Router composition, database startup check and graceful shutdown

use anyhow::Context;
use axum::{extract::Extension, Router};
use sqlx::{
    postgres::{PgConnection, PgPool, PgPoolOptions},
    Connection,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::common::{config::DbConfig, AppState};
use crate::users::users_routes;

/// Builds the application router
///
/// `auth_routes`, when given, is nested under `/api/auth` and is never gated
/// by bearer token verification.
pub fn build_router(state: AppState, auth_routes: Option<Router>) -> Router {
    let mut app = Router::new().merge(users_routes(state.config.require_auth));

    if let Some(auth_routes) = auth_routes {
        app = app.nest("/api/auth", auth_routes);
    }

    app.layer(Extension(Arc::new(state)))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Cross-origin requests are allowed from anywhere
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the pool without opening a connection; see [`verify_database`]
pub fn connect_pool(db: &DbConfig) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(db.connect_options())
}

/// Trivial round-trip proving the database is reachable
///
/// Runs over one direct connection so a refused connection fails at once
/// instead of being retried by the pool until its acquire timeout.
pub async fn verify_database(db: &DbConfig) -> anyhow::Result<()> {
    let mut conn = PgConnection::connect_with(&db.connect_options())
        .await
        .context("Failed to connect to database")?;
    sqlx::query("SELECT 1")
        .execute(&mut conn)
        .await
        .context("Database connectivity check failed")?;
    conn.close()
        .await
        .context("Failed to close connectivity check connection")?;
    Ok(())
}

/// Serves until a termination signal arrives, then closes the pool
pub async fn serve(app: Router, port: u16, pool: PgPool) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server running on port {}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Database pool closed, shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Termination signal received, shutting down gracefully");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::testing::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    fn protected_state() -> AppState {
        test_state(
            test_config(true, Some(TEST_SECRET)),
            Arc::new(InMemoryUserRepository::default()),
        )
    }

    #[tokio::test]
    async fn test_auth_sub_router_is_not_gated() {
        let auth_routes = Router::new().route("/login", post(|| async { "ok" }));
        let app = build_router(protected_state(), Some(auth_routes));

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = build_router(protected_state(), None);

        let request = Request::builder()
            .uri("/api/nothing-here")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_on_error_responses() {
        let app = build_router(protected_state(), None);

        let request = Request::builder()
            .uri("/api/users")
            .header("origin", "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let app = build_router(protected_state(), None);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/users")
            .header("origin", "https://elsewhere.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "authorization,content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_verify_database_fails_when_unreachable() {
        let db = DbConfig {
            user: "postgres".to_string(),
            host: "127.0.0.1".to_string(),
            name: "postgres".to_string(),
            password: None,
            port: 1,
        };
        let started = Instant::now();
        let result = verify_database(&db).await;

        assert!(result.is_err());
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "connectivity check should fail without retrying"
        );
    }
}
