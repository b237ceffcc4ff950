//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request payload
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "john_doe")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

/// Refresh token request payload
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct RefreshTokenRequest {
    /// A token previously issued by this service
    #[validate(length(min = 1, message = "Token is required"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub token: String,
}

/// Response for both login and token refresh
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub token: String,
}
