//! JSON response writing.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{AppError, AppResult};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Serializes `body` and writes it with `status`.
///
/// Serialization happens before any status is committed, so a failure
/// surfaces as [`AppError::Encode`] (500) instead of a half-written response.
pub fn respond_with_json<T: Serialize>(status: StatusCode, body: &T) -> AppResult<Response> {
    let bytes = serde_json::to_vec(body).map_err(AppError::Encode)?;

    let mut response = (status, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    Ok(response)
}
