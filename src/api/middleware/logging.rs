//! Logging middleware for request/response tracing.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{Instrument, info, info_span};

use super::RequestId;

/// Logs each request and its response inside an `http_request` span.
///
/// Must run after [`super::request_id_middleware`] so the request ID is
/// available; otherwise `"unknown"` is recorded.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;

        info!(
            status = %response.status().as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Response sent"
        );

        response
    }
    .instrument(span)
    .await
}
