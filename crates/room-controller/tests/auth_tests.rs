//! Authentication integration tests for the Room Controller.
//!
//! Covers registration, login, and the bearer-token middleware guarding
//! the meeting surface. Tests drive the real router via `tower::ServiceExt`
//! without binding a socket.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use room_controller::config::Config;
use room_controller::routes::{self, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_app() -> Router {
    let vars = HashMap::from([(
        "RC_JWT_SECRET".to_string(),
        "integration-test-secret-0123456789ab".to_string(),
    )]);
    let config = Config::from_vars(&vars).expect("test config should load");
    routes::build_routes(Arc::new(AppState::new(config)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, email: &str, password: &str, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/register",
            json!({"email": email, "password": password, "name": name}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = test_app();

    let body = register(&app, "alice@example.com", "hunter2-hunter2", "Alice").await;

    assert!(body["token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"]["id"].is_string());
    // The password never appears in the response
    assert!(body.get("password").is_none());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app();
    register(&app, "alice@example.com", "hunter2-hunter2", "Alice").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/register",
            json!({"email": "alice@example.com", "password": "other-password", "name": "Alia"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/register",
            json!({"email": "not-an-email", "password": "hunter2", "name": "Alice"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/register",
            json!({"email": "a@b.c", "password": "", "name": "Alice"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = test_app();
    register(&app, "alice@example.com", "hunter2-hunter2", "Alice").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({"email": "alice@example.com", "password": "hunter2-hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_login_unknown_email_unauthenticated() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({"email": "nobody@example.com", "password": "whatever"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_login_wrong_password_unauthenticated() {
    let app = test_app();
    register(&app, "alice@example.com", "hunter2-hunter2", "Alice").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({"email": "alice@example.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Bearer Middleware
// ============================================================================

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/meetings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 401 responses carry a WWW-Authenticate challenge
    let www_auth = response.headers().get("WWW-Authenticate").unwrap();
    assert!(www_auth.to_str().unwrap().contains("Bearer"));

    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/meetings")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/meetings")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_token_from_other_secret() {
    let app = test_app();

    // A structurally valid token signed under a different secret
    let other_vars = HashMap::from([(
        "RC_JWT_SECRET".to_string(),
        "a-completely-different-secret-value!".to_string(),
    )]);
    let other_config = Config::from_vars(&other_vars).unwrap();
    let other_state = AppState::new(other_config);
    let token = other_state
        .tokens
        .issue(uuid::Uuid::new_v4(), "mallory@evil.example")
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/meetings")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_issued_token_grants_access() {
    let app = test_app();
    let body = register(&app, "alice@example.com", "hunter2-hunter2", "Alice").await;
    let token = body["token"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/meetings")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["meetings"], json!([]));
}

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
}
