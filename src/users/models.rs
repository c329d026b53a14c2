// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model, projected to the columns the API exposes
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// POST /api/users request body
///
/// Both fields are optional so a missing field is reported by the validator
/// with a field-specific message instead of failing JSON parsing.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Trimmed fields ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
