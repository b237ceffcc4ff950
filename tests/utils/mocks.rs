use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use user_api::error::{ServiceError, ServiceResult};
use user_api::models::{CreateUser, User};
use user_api::services::UserService;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// One recorded `UserService` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Create(CreateUser),
    GetById(String),
    Login {
        username: String,
        password: String,
        referer: String,
    },
    RefreshToken {
        subject: String,
        username: String,
        role: String,
        referer: String,
    },
}

/// Recording `UserService` with scripted outcomes.
///
/// Successful calls return canned values; a failure message configured for
/// an operation makes it return `ServiceError::Internal` instead.
#[derive(Clone, Default)]
pub struct MockUserService {
    calls: Arc<RwLock<Vec<ServiceCall>>>,
    users: Arc<RwLock<HashMap<String, User>>>,
    failures: Arc<RwLock<HashMap<&'static str, String>>>,
}

pub const LOGIN_TOKEN: &str = "login-token";
pub const REFRESHED_TOKEN: &str = "refreshed-token";
pub const CREATED_USER_ID: &str = "new-user-id";

impl MockUserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Makes `operation` ("create", "get_by_id", "login", "refresh_token")
    /// fail with `message`.
    pub async fn fail(&self, operation: &'static str, message: &str) {
        self.failures
            .write()
            .await
            .insert(operation, message.to_string());
    }

    pub async fn calls(&self) -> Vec<ServiceCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: ServiceCall) {
        self.calls.write().await.push(call);
    }

    async fn scripted_failure(&self, operation: &str) -> Option<ServiceError> {
        self.failures
            .read()
            .await
            .get(operation)
            .map(|message| ServiceError::Internal(anyhow::anyhow!(message.clone())))
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn create(&self, new_user: CreateUser) -> ServiceResult<User> {
        self.record(ServiceCall::Create(new_user.clone())).await;
        if let Some(error) = self.scripted_failure("create").await {
            return Err(error);
        }

        Ok(User {
            id: CREATED_USER_ID.to_string(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
        })
    }

    async fn get_by_id(&self, id: &str) -> ServiceResult<User> {
        self.record(ServiceCall::GetById(id.to_string())).await;
        if let Some(error) = self.scripted_failure("get_by_id").await {
            return Err(error);
        }

        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("User", "id", id))
    }

    async fn login(&self, username: &str, password: &str, referer: &str) -> ServiceResult<String> {
        self.record(ServiceCall::Login {
            username: username.to_string(),
            password: password.to_string(),
            referer: referer.to_string(),
        })
        .await;
        if let Some(error) = self.scripted_failure("login").await {
            return Err(error);
        }

        Ok(LOGIN_TOKEN.to_string())
    }

    async fn refresh_token(
        &self,
        subject: &str,
        username: &str,
        role: &str,
        referer: &str,
    ) -> ServiceResult<String> {
        self.record(ServiceCall::RefreshToken {
            subject: subject.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            referer: referer.to_string(),
        })
        .await;
        if let Some(error) = self.scripted_failure("refresh_token").await {
            return Err(error);
        }

        Ok(REFRESHED_TOKEN.to_string())
    }
}
