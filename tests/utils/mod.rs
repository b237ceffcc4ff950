pub mod mocks;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tower::ServiceExt;

use user_api::api::routes::create_router;
use user_api::config::JwtConfig;
use user_api::state::AppState;

#[allow(unused_imports)]
pub use mocks::{CREATED_USER_ID, LOGIN_TOKEN, MockUserService, REFRESHED_TOKEN, ServiceCall};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiration: 1,
    }
}

/// Full router backed by `service`.
pub fn app(service: &MockUserService) -> Router {
    create_router(AppState::new(Arc::new(service.clone()), jwt_config()))
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Signs arbitrary claims, bypassing the service's own token issuance.
pub fn sign(claims: &serde_json::Value, algorithm: Algorithm, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
