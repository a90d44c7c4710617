//! Test utilities for integration tests.
//!
//! This module provides a recording mock backend and helpers for building
//! requests against the gateway router.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

use course_portal::error::TransportError;
use course_portal::{
    create_router, Backend, BackendRequest, BackendResponse, ProxyService, RouterConfig,
};

// =============================================================================
// Mock Backend with Request Tracking
// =============================================================================

/// What the mock backend answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond { status: StatusCode, body: Bytes },
    Fail(String),
}

/// A mock backend that records every request and replays a fixed reply.
///
/// Clones share the recorded requests, so a test can keep one handle while
/// the router owns another.
#[derive(Clone)]
pub struct MockBackend {
    reply: Arc<RwLock<MockReply>>,
    request_count: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<BackendRequest>>>,
}

impl MockBackend {
    /// Backend answering `200 {}` to everything.
    pub fn new() -> Self {
        Self::with_json(StatusCode::OK, serde_json::json!({}))
    }

    pub fn with_json(status: StatusCode, body: Value) -> Self {
        Self::with_reply(MockReply::Respond {
            status,
            body: Bytes::from(body.to_string()),
        })
    }

    pub fn with_raw(status: StatusCode, body: &'static str) -> Self {
        Self::with_reply(MockReply::Respond {
            status,
            body: Bytes::from_static(body.as_bytes()),
        })
    }

    /// Backend that cannot be reached.
    pub fn unreachable(reason: &str) -> Self {
        Self::with_reply(MockReply::Fail(reason.to_string()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply: Arc::new(RwLock::new(reply)),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub async fn get_requests(&self) -> Vec<BackendRequest> {
        self.requests.read().await.clone()
    }

    /// The only request seen so far. Panics unless exactly one was made.
    pub async fn single_request(&self) -> BackendRequest {
        let requests = self.get_requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one backend call");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, TransportError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(request);

        match self.reply.read().await.clone() {
            MockReply::Respond { status, body } => Ok(BackendResponse::new(status, body)),
            MockReply::Fail(reason) => Err(TransportError::Connection(reason)),
        }
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Router over `backend` with test-friendly settings.
pub fn test_router(backend: MockBackend) -> Router {
    create_router(ProxyService::new(backend), test_config())
}

pub fn test_config() -> RouterConfig {
    RouterConfig::default().with_tracing(false)
}

/// Send one request through a router.
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

/// GET request, optionally with a session token cookie.
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, Body::empty())
}

/// Request with the given method and no body.
pub fn empty(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    request(method, uri, token, Body::empty())
}

/// Request with a JSON body.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut request = request(method, uri, token, Body::from(body.to_string()));
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    request
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }
    builder.body(body).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// All `Set-Cookie` header values.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Multipart Builder
// =============================================================================

pub const BOUNDARY: &str = "----course-portal-test-boundary";

/// Hand-built multipart/form-data body.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body and wrap it in a request.
    pub fn into_request(mut self, method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut request = request(method, uri, token, Body::from(self.body));
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}"))
                .unwrap(),
        );
        request
    }
}
