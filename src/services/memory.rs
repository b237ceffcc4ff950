//! In-memory user service.
//!
//! Keeps users in process memory, hashes passwords with Argon2 and signs
//! tokens with the configured JWT secret. State is lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{CreateUser, User};
use crate::services::UserService;
use crate::utils::jwt::generate_token;
use crate::utils::password::{hash_password, verify_password};

struct StoredUser {
    user: User,
    password_hash: String,
}

/// [`UserService`] backed by concurrent hash maps.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct InMemoryUserService {
    users: Arc<DashMap<String, StoredUser>>,
    /// username -> id
    usernames: Arc<DashMap<String, String>>,
    /// email -> id
    emails: Arc<DashMap<String, String>>,
    jwt_config: JwtConfig,
}

impl InMemoryUserService {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            usernames: Arc::new(DashMap::new()),
            emails: Arc::new(DashMap::new()),
            jwt_config,
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Claims the username and email for `id`, failing if either is taken.
    ///
    /// Locks are always taken usernames-then-emails.
    fn reserve_identity(&self, id: &str, username: &str, email: &str) -> ServiceResult<()> {
        match self.usernames.entry(username.to_string()) {
            Entry::Occupied(_) => Err(ServiceError::duplicate("user", "username", username)),
            Entry::Vacant(username_slot) => {
                match self.emails.entry(email.to_string()) {
                    Entry::Occupied(_) => {
                        return Err(ServiceError::duplicate("user", "email", email));
                    }
                    Entry::Vacant(email_slot) => {
                        email_slot.insert(id.to_string());
                    }
                }
                username_slot.insert(id.to_string());
                Ok(())
            }
        }
    }

    fn sign(&self, subject: &str, username: &str, role: &str) -> ServiceResult<String> {
        let token = generate_token(
            subject,
            username,
            role,
            &self.jwt_config.secret,
            self.jwt_config.token_expiration,
        )?;
        Ok(token)
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn create(&self, new_user: CreateUser) -> ServiceResult<User> {
        let password = new_user.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| anyhow::anyhow!("password hashing task failed: {}", e))??;

        let id = Uuid::new_v4().to_string();
        self.reserve_identity(&id, &new_user.username, &new_user.email)?;

        let user = User {
            id: id.clone(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
        };

        self.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );

        debug!(user_id = %user.id, username = %user.username, "User stored");
        Ok(user)
    }

    async fn get_by_id(&self, id: &str) -> ServiceResult<User> {
        self.users
            .get(id)
            .map(|stored| stored.user.clone())
            .ok_or_else(|| ServiceError::not_found("user", "id", id))
    }

    async fn login(&self, username: &str, password: &str, referer: &str) -> ServiceResult<String> {
        let stored = self
            .usernames
            .get(username)
            .map(|id| id.value().clone())
            .and_then(|id| {
                self.users
                    .get(&id)
                    .map(|s| (s.user.clone(), s.password_hash.clone()))
            });

        let Some((user, password_hash)) = stored else {
            warn!(username = %username, referer = %referer, "Login for unknown user");
            return Err(ServiceError::InvalidCredentials);
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;

        if !valid {
            warn!(username = %username, referer = %referer, "Login with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.sign(&user.id, &user.username, &user.role)?;
        info!(user_id = %user.id, referer = %referer, "User logged in");
        Ok(token)
    }

    async fn refresh_token(
        &self,
        subject: &str,
        username: &str,
        role: &str,
        referer: &str,
    ) -> ServiceResult<String> {
        if !self.users.contains_key(subject) {
            return Err(ServiceError::not_found("user", "id", subject));
        }

        let token = self.sign(subject, username, role)?;
        info!(user_id = %subject, referer = %referer, "Token refreshed");
        Ok(token)
    }
}
