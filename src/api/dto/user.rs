//! User-related DTOs for API requests and responses.

use crate::models::{CreateUser, User};
use crate::utils::validate::validate_role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Absent fields decode as empty strings and are rejected by validation.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "john@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, max = 64, message = "First name must be between 1 and 64 characters"))]
    #[schema(example = "John", min_length = 1, max_length = 64)]
    pub first_name: String,
    #[validate(length(min = 1, max = 64, message = "Last name must be between 1 and 64 characters"))]
    #[schema(example = "Doe", min_length = 1, max_length = 64)]
    pub last_name: String,
    #[validate(length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"))]
    #[schema(format = "password", min_length = 6, max_length = 72)]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "user")]
    pub role: String,
    #[validate(length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"))]
    #[schema(example = "john_doe", min_length = 3, max_length = 32)]
    pub username: String,
}

impl CreateUserRequest {
    /// Converts the request DTO into the service input.
    pub fn into_create_user(self) -> CreateUser {
        CreateUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password: self.password,
            role: self.role,
            username: self.username,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for `POST /users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub user: User,
}

/// Response body for `GET /users/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GetUserResponse {
    pub user: User,
}
