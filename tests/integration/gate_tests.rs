//! Session gate integration tests.
//!
//! Tests verify:
//! - Anonymous navigation to admin pages redirects to the login page
//! - Signed-in navigation to the login page redirects to the dashboard
//! - Everything else passes through untouched
//! - The gate never calls the backend

use axum::http::StatusCode;

use super::test_utils::{get, location, send, test_router, text_body, MockBackend};

// =============================================================================
// Protected Pages
// =============================================================================

#[tokio::test]
async fn test_dashboard_without_token_redirects_to_login() {
    let backend = MockBackend::new();
    let router = test_router(backend.clone());

    let response = send(router, get("/admin/dashboard", None)).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/admin/login"));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_every_protected_page_redirects() {
    for path in ["/admin/dashboard", "/admin/courses", "/admin/profile"] {
        let router = test_router(MockBackend::new());
        let response = send(router, get(path, None)).await;

        assert_eq!(
            response.status(),
            StatusCode::TEMPORARY_REDIRECT,
            "{} should be gated",
            path
        );
        assert_eq!(location(&response), Some("/admin/login"));
    }
}

#[tokio::test]
async fn test_empty_token_cookie_counts_as_anonymous() {
    let router = test_router(MockBackend::new());

    let response = send(router, get("/admin/courses", Some(""))).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/admin/login"));
}

#[tokio::test]
async fn test_dashboard_with_token_passes_through() {
    let backend = MockBackend::new();
    let router = test_router(backend.clone());

    let response = send(router, get("/admin/dashboard", Some("abc"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("Dashboard"));
    assert_eq!(backend.request_count(), 0);
}

// =============================================================================
// Login Page
// =============================================================================

#[tokio::test]
async fn test_login_page_with_token_redirects_to_dashboard() {
    let router = test_router(MockBackend::new());

    let response = send(router, get("/admin/login", Some("abc"))).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_login_page_without_token_is_served() {
    let router = test_router(MockBackend::new());

    let response = send(router, get("/admin/login", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("/api/auth/login"));
}

// =============================================================================
// Pass Through
// =============================================================================

#[tokio::test]
async fn test_public_pages_pass_through() {
    for token in [None, Some("abc")] {
        let router = test_router(MockBackend::new());
        let response = send(router, get("/", token)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let router = test_router(MockBackend::new());
        let response = send(router, get("/health", token)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_gate_leaves_api_calls_to_the_proxy() {
    let backend = MockBackend::new();
    let router = test_router(backend.clone());

    // No redirect: the proxy itself answers 401 for a missing token
    let response = send(router, get("/api/courses", None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&response).is_none());
    assert_eq!(backend.request_count(), 0);
}
