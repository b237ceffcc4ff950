//! Error handler for converting AppError to HTTP responses.
//!
//! Every failing request gets the same envelope, `{"message": "..."}`, with
//! the status taken from [`AppError::status_code`].

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Content type of error responses
pub const ERROR_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status.as_u16(), error = %message, "Request rejected");
        }

        // An envelope that fails to serialize still yields the status code
        let body = serde_json::to_vec(&ErrorResponse::new(message)).unwrap_or_default();

        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(ERROR_CONTENT_TYPE),
        );
        response
    }
}
