//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User creation and lookup DTOs
//! - `auth` - Login and token refresh DTOs
//! - `error` - The JSON error envelope
//! - `health` - Health check response

mod auth;
mod error;
mod health;
mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest};
pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use user::{CreateUserRequest, CreateUserResponse, GetUserResponse};
