//! Test doubles and request helpers shared by router-level tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use super::models::User;
use super::repository::UserRepository;
use crate::common::config::{AppConfig, DbConfig};
use crate::common::AppState;

/// Keeps users in memory and assigns sequential ids like a SERIAL column
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        Ok(self.users.lock().await.clone())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, sqlx::Error> {
        let mut users = self.users.lock().await;
        let user = User {
            id: users.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Every call fails as if the pool had been closed
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn create_user(&self, _name: &str, _email: &str) -> Result<User, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }
}

pub const TEST_SECRET: &str = "test_secret_key";

pub fn test_config(require_auth: bool, jwt_secret: Option<&str>) -> AppConfig {
    AppConfig {
        db: DbConfig {
            user: "postgres".to_string(),
            host: "localhost".to_string(),
            name: "postgres".to_string(),
            password: None,
            port: 5432,
        },
        port: 3000,
        jwt_secret: jwt_secret.map(str::to_string),
        require_auth,
    }
}

pub fn test_state(config: AppConfig, users: Arc<dyn UserRepository>) -> AppState {
    AppState::new(config, users)
}

/// Sends one request through the router and returns the status and JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get_users(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/users");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn post_users(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("valid request")
}
