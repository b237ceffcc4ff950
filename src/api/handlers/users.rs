//! User request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, CreateUserResponse, ErrorResponse, GetUserResponse};
use crate::api::response::respond_with_json;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, validate_user_id};

/// Creates user-related routes.
///
/// Routes:
/// - POST /users       - Create a new user
/// - GET  /users/{id}  - Get user by ID
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user))
        .routes(routes!(get_user_by_id))
}

/// POST /users - Create new user
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Undecodable body or service failure", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Response> {
    let user = state
        .users
        .create(payload.into_create_user())
        .await
        .map_err(AppError::CreateUser)?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    respond_with_json(StatusCode::CREATED, &CreateUserResponse { user })
}

/// GET /users/{id} - Get user by ID
///
/// A missing user is reported as a lookup failure (500), not 404.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = GetUserResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Lookup failed", body = ErrorResponse)
    )
)]
async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    validate_user_id(&id)?;

    let user = state
        .users
        .get_by_id(&id)
        .await
        .map_err(AppError::GetUser)?;

    tracing::debug!(user_id = %user.id, "User fetched");

    respond_with_json(StatusCode::OK, &GetUserResponse { user })
}
