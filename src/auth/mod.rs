//! # Auth Module
//!
//! Bearer token authentication for protected routes:
//! - JWT signature and expiry verification against `JWT_SECRET`
//! - `authenticate_token` middleware that gates a router
//! - `AuthedUser` request extension carrying the decoded claims

pub mod middleware;
pub mod models;
pub mod verifier;


pub use middleware::authenticate_token;
pub use models::AuthedUser;
