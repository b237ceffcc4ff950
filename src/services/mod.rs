//! Service layer for business logic operations.
//!
//! Handlers depend only on the [`UserService`] capability; the concrete
//! implementation is chosen when the application state is built.

mod memory;

pub use memory::InMemoryUserService;

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{CreateUser, User};

/// User management capability consumed by the HTTP handlers.
///
/// Persistence, credential checking and token issuance all live behind this
/// trait. `referer` is the request's `Referer` header (empty when absent),
/// passed through for audit purposes.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persists a new user and returns it with its assigned id.
    async fn create(&self, new_user: CreateUser) -> ServiceResult<User>;

    /// Looks up a user by id.
    async fn get_by_id(&self, id: &str) -> ServiceResult<User>;

    /// Checks credentials and returns a freshly signed token.
    async fn login(&self, username: &str, password: &str, referer: &str) -> ServiceResult<String>;

    /// Issues a new token for an identity taken from a verified token.
    async fn refresh_token(
        &self,
        subject: &str,
        username: &str,
        role: &str,
        referer: &str,
    ) -> ServiceResult<String>;
}
