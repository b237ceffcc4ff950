//! Router configuration for the API.

use axum::{Json, Router, middleware, routing::get};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Path the generated OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
///
/// # Routes
/// - `POST /users`, `GET /users/{id}`
/// - `POST /login`, `POST /refresh`
/// - `GET /health`
/// - `GET /api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::users::user_routes())
        .merge(handlers::auth::auth_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .route(OPENAPI_PATH, get(move || async move { Json(api) }))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
