//! Login and logout integration tests.
//!
//! Tests verify:
//! - Successful login stores the backend token in the session cookie
//! - Failed logins relay the backend's status and message without a cookie
//! - Logout clears the cookie without calling the backend
//! - A cookie issued at login opens the admin pages

use axum::http::StatusCode;
use serde_json::json;

use course_portal::{create_router, CookieSettings, OutboundBody, ProxyService};

use super::test_utils::{
    empty, get, json_body, json_request, location, send, set_cookies, test_config, test_router,
    MockBackend,
};

const CREDENTIALS: &str = r#"{"email": "admin@example.com", "password": "hunter2"}"#;

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let backend = MockBackend::with_json(
        StatusCode::OK,
        json!({"token": "abc123", "user": {"name": "Admin"}}),
    );
    let router = test_router(backend.clone());

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with("token=abc123"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));

    let body = json_body(response).await;
    assert_eq!(body["user"]["name"], "Admin");

    let request = backend.single_request().await;
    assert_eq!(request.path, "/api/auth/login");
    assert!(request.bearer.is_none());
    assert_eq!(
        request.body,
        OutboundBody::Json(json!({"email": "admin@example.com", "password": "hunter2"}))
    );
}

#[tokio::test]
async fn test_login_cookie_follows_settings() {
    let backend = MockBackend::with_json(StatusCode::OK, json!({"token": "abc123"}));
    let config = test_config().with_cookies(CookieSettings {
        secure: false,
        max_age: 600,
    });
    let router = create_router(ProxyService::new(backend), config);

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(!cookies[0].contains("Secure"));
    assert!(cookies[0].contains("Max-Age=600"));
}

#[tokio::test]
async fn test_login_failure_relays_backend_message() {
    let backend = MockBackend::with_json(
        StatusCode::UNAUTHORIZED,
        json!({"message": "Invalid credentials"}),
    );
    let router = test_router(backend);

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(json_body(response).await["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_failure_without_message() {
    let backend = MockBackend::with_raw(StatusCode::BAD_REQUEST, "");
    let router = test_router(backend);

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Login failed");
}

#[tokio::test]
async fn test_login_reply_without_token_sets_no_cookie() {
    let backend = MockBackend::with_json(StatusCode::OK, json!({"user": {"name": "Admin"}}));
    let router = test_router(backend);

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_backend_unreachable() {
    let backend = MockBackend::unreachable("connection refused");
    let router = test_router(backend);

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(
        json_body(response).await["message"],
        "Internal server error"
    );
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let backend = MockBackend::new();
    let router = test_router(backend.clone());

    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, "email=admin"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.request_count(), 0);
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_cookie_locally() {
    let backend = MockBackend::new();
    let router = test_router(backend.clone());

    let response = send(router, empty("POST", "/api/auth/logout", Some("abc123"))).await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token="));
    assert!(cookies[0].contains("Max-Age=0"));
    assert!(cookies[0].contains("Path=/"));

    assert_eq!(json_body(response).await["message"], "Logged out");
    assert_eq!(backend.request_count(), 0);
}

// =============================================================================
// Full Flow
// =============================================================================

#[tokio::test]
async fn test_login_cookie_opens_dashboard() {
    let backend = MockBackend::with_json(StatusCode::OK, json!({"token": "abc123"}));

    let router = test_router(backend.clone());
    let response = send(
        router,
        json_request("POST", "/api/auth/login", None, CREDENTIALS),
    )
    .await;
    let cookie = set_cookies(&response).remove(0);
    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("token="))
        .unwrap()
        .to_string();

    let router = test_router(backend.clone());
    let response = send(router, get("/admin/dashboard", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let router = test_router(backend);
    let response = send(router, get("/admin/login", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/admin/dashboard"));
}
