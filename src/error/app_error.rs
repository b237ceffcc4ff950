use axum::http::StatusCode;
use thiserror::Error;

use crate::error::ServiceError;
use crate::utils::jwt::TokenError;

/// Errors surfaced by the HTTP handlers.
///
/// Each variant carries the context of the step that failed. The rendered
/// message is `"<context>: <underlying error>"`, which is what ends up in the
/// `message` field of the JSON error envelope.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be read or is not valid JSON
    #[error("unable to decode json request: {0}")]
    Decode(String),

    /// The decoded request failed field validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// `UserService::create` failed
    #[error("unable to add user: {0}")]
    CreateUser(#[source] ServiceError),

    /// `UserService::get_by_id` failed, including the not-found case
    #[error("unable to get user: {0}")]
    GetUser(#[source] ServiceError),

    /// `UserService::login` failed, for any reason
    #[error("unable to log in user: {0}")]
    Login(#[source] ServiceError),

    /// The presented token could not be verified
    #[error("Access not allowed: {0}")]
    AccessDenied(#[source] TokenError),

    /// `UserService::refresh_token` failed
    #[error("unable to refresh token: {0}")]
    RefreshToken(#[source] ServiceError),

    /// The response body could not be serialized
    #[error("unable to marshal json response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Login failures map to 400 and lookup failures to 500 regardless of
    /// the underlying cause; clients cannot tell "not found" from an
    /// internal failure by status alone.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::CreateUser(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GetUser(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Login(_) => StatusCode::BAD_REQUEST,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::RefreshToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Type alias for Result with AppError to simplify handler signatures
pub type AppResult<T> = Result<T, AppError>;
