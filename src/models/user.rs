use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user as returned to clients.
///
/// Owned by the user service; handlers only pass it through. Never carries
/// credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = "3f0c1d4e-6a7b-4c1d-9e2f-8a9b0c1d2e3f")]
    pub id: String,
    #[schema(example = "john_doe")]
    pub username: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "user")]
    pub role: String,
}

/// Input to `UserService::create`, built from a validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
    pub username: String,
}
