use std::borrow::Cow;
use std::sync::LazyLock;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Roles a user may be created with.
pub const ALLOWED_ROLES: &[&str] = &["admin", "user"];

static USER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("user id pattern is valid"));

/// JSON body extractor that decodes and then validates.
///
/// The body is decoded regardless of `Content-Type` and must start with a
/// JSON object. A body that cannot be read or parsed becomes [`AppError::Decode`]; a parsed body that fails its
/// `Validate` rules becomes [`AppError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Decode(rejection.body_text()))?;

        let value: T = decode_object(&body)?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Decodes the first JSON value in `body`, which must be an object.
///
/// Anything after that value is ignored.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| AppError::Decode("empty request body".to_string()))?
        .map_err(|e| AppError::Decode(e.to_string()))?;

    if !first.is_object() {
        return Err(AppError::Decode(format!(
            "expected a json object, found {}",
            json_kind(&first)
        )));
    }

    serde_json::from_value(first).map_err(|e| AppError::Decode(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validates a user identifier taken from the request path.
pub fn validate_user_id(id: &str) -> AppResult<()> {
    if USER_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "id: '{}' is not a valid user id (1-64 characters of [A-Za-z0-9_-])",
            id
        )))
    }
}

/// `validator` custom rule for the `role` field.
pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    if ALLOWED_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(ValidationError::new("role")
            .with_message(Cow::Owned(format!("Role must be one of: {}", ALLOWED_ROLES.join(", ")))))
    }
}
