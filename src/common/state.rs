// Application state shared by every handler

use std::sync::Arc;

use crate::common::config::AppConfig;
use crate::users::UserRepository;

/// Injected into the router as `Extension<Arc<AppState>>`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            config: Arc::new(config),
            users,
        }
    }
}
