mod utils;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use jiff::Timestamp;
use jsonwebtoken::Algorithm;
use serde_json::json;

use user_api::models::{CreateUser, User};
use utils::*;

const CREATE_BODY: &str = r#"{
    "email": "alice@example.com",
    "first_name": "Alice",
    "last_name": "Liddell",
    "password": "wonderland",
    "role": "admin",
    "username": "alice"
}"#;

fn alice() -> User {
    User {
        id: "u1".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        role: "admin".to_string(),
    }
}

fn alice_claims() -> serde_json::Value {
    json!({"sub": "u1", "username": "alice", "role": "admin"})
}

fn refresh_request(token: &str) -> Request<Body> {
    json_request(
        Method::POST,
        "/refresh",
        &json!({ "token": token }).to_string(),
    )
}

fn message_of(body: &serde_json::Value) -> &str {
    body["message"].as_str().unwrap()
}

// ============================================================================
// POST /users
// ============================================================================

#[tokio::test]
async fn test_create_user_calls_service_once_and_returns_201() {
    let service = MockUserService::new();

    let response = send(app(&service), json_request(Method::POST, "/users", CREATE_BODY)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], CREATED_USER_ID);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password").is_none());

    assert_eq!(
        service.calls().await,
        vec![ServiceCall::Create(CreateUser {
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            password: "wonderland".to_string(),
            role: "admin".to_string(),
            username: "alice".to_string(),
        })]
    );
}

#[tokio::test]
async fn test_create_user_malformed_json_is_500() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        json_request(Method::POST, "/users", r#"{"username": "alice""#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(message_of(&body).contains("unable to decode json request"));
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_user_array_body_is_500() {
    let service = MockUserService::new();

    let response = send(app(&service), json_request(Method::POST, "/users", "[]")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("unable to decode json request: "));
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_user_ignores_trailing_bytes() {
    let service = MockUserService::new();
    let body = format!("{CREATE_BODY} trailing");

    let response = send(app(&service), json_request(Method::POST, "/users", &body)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(service.calls().await.len(), 1);
}

#[tokio::test]
async fn test_create_user_missing_field_is_400_without_service_call() {
    let service = MockUserService::new();
    let body = json!({
        "first_name": "Alice",
        "last_name": "Liddell",
        "password": "wonderland",
        "role": "admin",
        "username": "alice"
    });

    let response = send(
        app(&service),
        json_request(Method::POST, "/users", &body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("Validation error: "));
    assert!(message_of(&body).contains("email"));
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_user_unknown_role_is_400() {
    let service = MockUserService::new();
    let body = CREATE_BODY.replace(r#""admin""#, r#""root""#);

    let response = send(app(&service), json_request(Method::POST, "/users", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_user_service_failure_is_500() {
    let service = MockUserService::new();
    service.fail("create", "store unavailable").await;

    let response = send(app(&service), json_request(Method::POST, "/users", CREATE_BODY)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        message_of(&body),
        "unable to add user: internal error: store unavailable"
    );
}

#[tokio::test]
async fn test_create_user_without_content_type_still_decodes() {
    let service = MockUserService::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .body(Body::from(CREATE_BODY))
        .unwrap();

    let response = send(app(&service), request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

// ============================================================================
// GET /users/{id}
// ============================================================================

#[tokio::test]
async fn test_get_user_by_id_returns_user() {
    let service = MockUserService::new();
    service.add_user(alice()).await;

    let response = send(
        app(&service),
        Request::builder().uri("/users/u1").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "user": alice() }));
    assert_eq!(service.calls().await, vec![ServiceCall::GetById("u1".to_string())]);
}

#[tokio::test]
async fn test_get_user_by_id_twice_returns_identical_json() {
    let service = MockUserService::new();
    service.add_user(alice()).await;

    let get = || Request::builder().uri("/users/u1").body(Body::empty()).unwrap();
    let first = body_bytes(send(app(&service), get()).await).await;
    let second = body_bytes(send(app(&service), get()).await).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_user_not_found_is_500() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        Request::builder().uri("/users/nobody").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        message_of(&body),
        "unable to get user: User not found with id=nobody"
    );
}

#[tokio::test]
async fn test_get_user_invalid_id_is_400() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        Request::builder()
            .uri("/users/bad%20id")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.calls().await.is_empty());
}

// ============================================================================
// POST /login
// ============================================================================

#[tokio::test]
async fn test_login_passes_referer_and_returns_token() {
    let service = MockUserService::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::REFERER, "https://example.com/login")
        .body(Body::from(r#"{"username":"alice","password":"wonderland"}"#))
        .unwrap();

    let response = send(app(&service), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "token": LOGIN_TOKEN }));
    assert_eq!(
        service.calls().await,
        vec![ServiceCall::Login {
            username: "alice".to_string(),
            password: "wonderland".to_string(),
            referer: "https://example.com/login".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_login_without_referer_passes_empty_string() {
    let service = MockUserService::new();

    send(
        app(&service),
        json_request(Method::POST, "/login", r#"{"username":"alice","password":"pw"}"#),
    )
    .await;

    match service.calls().await.as_slice() {
        [ServiceCall::Login { referer, .. }] => assert_eq!(referer, ""),
        other => panic!("Expected one login call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_failure_is_400() {
    let service = MockUserService::new();
    service.fail("login", "database exploded").await;

    let response = send(
        app(&service),
        json_request(Method::POST, "/login", r#"{"username":"alice","password":"pw"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("unable to log in user: "));
}

#[tokio::test]
async fn test_login_missing_password_is_400_without_service_call() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        json_request(Method::POST, "/login", r#"{"username":"alice"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_login_malformed_json_is_500() {
    let service = MockUserService::new();

    let response = send(app(&service), json_request(Method::POST, "/login", "not json")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(message_of(&body).contains("unable to decode json request"));
    assert!(service.calls().await.is_empty());
}

// ============================================================================
// POST /refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_token_forwards_claims_and_echoes_token() {
    let service = MockUserService::new();
    let token = sign(&alice_claims(), Algorithm::HS256, TEST_SECRET);
    let mut request = refresh_request(&token);
    request
        .headers_mut()
        .insert(header::REFERER, "https://example.com/app".parse().unwrap());

    let response = send(app(&service), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "token": REFRESHED_TOKEN }));
    assert_eq!(
        service.calls().await,
        vec![ServiceCall::RefreshToken {
            subject: "u1".to_string(),
            username: "alice".to_string(),
            role: "admin".to_string(),
            referer: "https://example.com/app".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_refresh_token_wrong_algorithm_is_403() {
    let service = MockUserService::new();
    let token = sign(&alice_claims(), Algorithm::HS512, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        message_of(&body),
        "Access not allowed: Unexpected signing method: HS512"
    );
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_wrong_secret_is_403() {
    let service = MockUserService::new();
    let token = sign(
        &alice_claims(),
        Algorithm::HS256,
        "some-other-secret-that-is-long-enough",
    );

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_expired_is_403() {
    let service = MockUserService::new();
    let claims = json!({"sub": "u1", "username": "alice", "role": "admin", "exp": 1_000_000_000});
    let token = sign(&claims, Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_just_expired_is_403() {
    let service = MockUserService::new();
    let exp = Timestamp::now().as_second() - 5;
    let claims = json!({"sub": "u1", "username": "alice", "role": "admin", "exp": exp});
    let token = sign(&claims, Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_not_yet_valid_is_403() {
    let service = MockUserService::new();
    let nbf = Timestamp::now().as_second() + 3600;
    let claims = json!({"sub": "u1", "username": "alice", "role": "admin", "nbf": nbf});
    let token = sign(&claims, Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_with_audience_is_accepted() {
    let service = MockUserService::new();
    let claims = json!({"sub": "u1", "username": "alice", "role": "admin", "aud": "web"});
    let token = sign(&claims, Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "token": REFRESHED_TOKEN }));
    assert_eq!(service.calls().await.len(), 1);
}

#[tokio::test]
async fn test_refresh_token_malformed_json_is_500() {
    let service = MockUserService::new();

    let request = json_request(Method::POST, "/refresh", r#"{"token":"#);
    let response = send(app(&service), request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("unable to decode json request: "));
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_malformed_claims_fail_cleanly() {
    let service = MockUserService::new();
    let claims = json!({"sub": "u1", "username": ["alice"], "role": "admin"});
    let token = sign(&claims, Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("Access not allowed: "));
    assert!(service.calls().await.is_empty());
}

#[tokio::test]
async fn test_refresh_token_service_failure_is_500() {
    let service = MockUserService::new();
    service.fail("refresh_token", "signer offline").await;
    let token = sign(&alice_claims(), Algorithm::HS256, TEST_SECRET);

    let response = send(app(&service), refresh_request(&token)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(message_of(&body).starts_with("unable to refresh token: "));
}

#[tokio::test]
async fn test_refresh_token_empty_token_is_400() {
    let service = MockUserService::new();

    let response = send(app(&service), json_request(Method::POST, "/refresh", "{}")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.calls().await.is_empty());
}

// ============================================================================
// Ambient routes
// ============================================================================

#[tokio::test]
async fn test_health_and_request_id() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        Request::builder()
            .uri("/health")
            .header("x-request-id", "trace-me")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me");
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let service = MockUserService::new();

    let response = send(
        app(&service),
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    for path in ["/users", "/users/{id}", "/login", "/refresh", "/health"] {
        assert!(doc["paths"].get(path).is_some(), "missing path {}", path);
    }
}

// ============================================================================
// In-memory service end to end
// ============================================================================

#[tokio::test]
async fn test_in_memory_create_login_refresh_flow() {
    use std::sync::Arc;
    use user_api::api::routes::create_router;
    use user_api::services::InMemoryUserService;
    use user_api::state::AppState;
    use user_api::utils::jwt::validate_token;

    let service = InMemoryUserService::new(jwt_config());
    let router = create_router(AppState::new(Arc::new(service), jwt_config()));

    let created = send(
        router.clone(),
        json_request(Method::POST, "/users", CREATE_BODY),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let user_id = body_json(created).await["user"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let fetched = send(
        router.clone(),
        Request::builder()
            .uri(format!("/users/{}", user_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);

    let login = send(
        router.clone(),
        json_request(
            Method::POST,
            "/login",
            r#"{"username":"alice","password":"wonderland"}"#,
        ),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    let refreshed = send(router.clone(), refresh_request(&token)).await;
    assert_eq!(refreshed.status(), StatusCode::OK);
    let new_token = body_json(refreshed).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let claims = validate_token(&new_token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, "admin");

    let wrong_password = send(
        router,
        json_request(
            Method::POST,
            "/login",
            r#"{"username":"alice","password":"looking-glass"}"#,
        ),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
}
