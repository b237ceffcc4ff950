//! Application state for Axum web framework.
//!
//! Shared services and resources accessible across all request handlers.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::services::UserService;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap; the service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    /// Verifies tokens presented to `POST /refresh`
    pub jwt_config: JwtConfig,
}

impl AppState {
    pub fn new(users: Arc<dyn UserService>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }
}
