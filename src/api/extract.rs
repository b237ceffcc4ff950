//! Request extractors shared by the handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

/// The request's `Referer` header, or an empty string when absent or not
/// valid visible ASCII.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Referer(pub String);

impl<S> FromRequestParts<S> for Referer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let referer = parts
            .headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Ok(Referer(referer.to_string()))
    }
}
