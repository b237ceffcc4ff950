//! Authentication handlers for login and token refresh.

use axum::{extract::State, http::StatusCode, response::Response};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ErrorResponse, LoginRequest, LoginResponse, RefreshTokenRequest};
use crate::api::extract::Referer;
use crate::api::response::respond_with_json;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::validate_token;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /login` - Exchange credentials for a token
/// - `POST /refresh` - Exchange a valid token for a new one
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(refresh_token))
}

/// POST /login - Authenticate user
///
/// Every service failure, wrong credentials included, is reported as 400.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed or login rejected", body = ErrorResponse),
        (status = 500, description = "Undecodable body", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    Referer(referer): Referer,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Response> {
    let token = state
        .users
        .login(&payload.username, &payload.password, &referer)
        .await
        .map_err(AppError::Login)?;

    tracing::info!(username = %payload.username, "User logged in");

    respond_with_json(StatusCode::OK, &LoginResponse { token })
}

/// POST /refresh - Refresh token
///
/// The presented token must be HS256-signed with the configured secret,
/// unexpired, and carry string `sub`, `username` and `role` claims.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Token rejected", body = ErrorResponse),
        (status = 500, description = "Undecodable body or service failure", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    Referer(referer): Referer,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Response> {
    let claims =
        validate_token(&payload.token, &state.jwt_config.secret).map_err(AppError::AccessDenied)?;

    let token = state
        .users
        .refresh_token(&claims.sub, &claims.username, &claims.role, &referer)
        .await
        .map_err(AppError::RefreshToken)?;

    tracing::info!(subject = %claims.sub, "Token refreshed");

    respond_with_json(StatusCode::OK, &LoginResponse { token })
}
