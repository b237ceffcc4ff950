//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope returned by every failing request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// `"<context>: <underlying error>"`
    #[schema(example = "Validation error: username: Username must be between 3 and 32 characters")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
