// src/users/repository.rs
//! Persistence for the `users` table

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::User;

/// Storage operations on users; every statement is parameterized
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, in whatever order the store returns them
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error>;

    /// Inserts one user and returns it with the assigned id
    async fn create_user(&self, name: &str, email: &str) -> Result<User, sqlx::Error>;
}

/// PostgreSQL implementation over the shared pool
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&self.pool)
            .await
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }
}
