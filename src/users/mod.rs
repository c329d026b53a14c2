//! # Users Module
//!
//! The `users` resource: listing and creating users backed by the `users` table.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validators;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::{PgUserRepository, UserRepository};
pub use routes::users_routes;
