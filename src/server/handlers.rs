//! HTTP request handlers for the course portal gateway.
//!
//! # Endpoints
//!
//! - `/api/*` - proxied to the backend by [`proxy_endpoint`]
//! - `POST /api/auth/login` - proxied, issues the session cookie
//! - `POST /api/auth/logout` - clears the session cookie locally
//! - `GET /health` - health check

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{on, MethodRouter},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::backend::Backend;
use crate::error::ProxyError;
use crate::proxy::resources::LOGIN;
use crate::proxy::{
    read_inbound, AuthRequirement, PathParams, ProxyReply, ProxyRoute, ProxyService,
};
use crate::session::{CookieSettings, Session};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// Passed to all handlers via Axum's State extractor.
pub struct AppState<B: Backend> {
    /// Executes proxied routes against the backend
    pub proxy: Arc<ProxyService<B>>,

    /// Attributes for the session cookie issued at login
    pub cookies: CookieSettings,
}

impl<B: Backend> AppState<B> {
    pub fn new(proxy: ProxyService<B>) -> Self {
        Self {
            proxy: Arc::new(proxy),
            cookies: CookieSettings::default(),
        }
    }

    pub fn with_cookies(mut self, cookies: CookieSettings) -> Self {
        self.cookies = cookies;
        self
    }
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            proxy: Arc::clone(&self.proxy),
            cookies: self.cookies,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "unauthorized", "backend_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ProxyError to HTTP response.
///
/// Logging by severity:
/// - transport failures at ERROR, with the underlying reason
/// - backend-reported failures are already logged by the proxy service
/// - missing tokens and bad input at DEBUG/WARN
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.kind();
        let message = self.public_message();

        match &self {
            ProxyError::Transport { reason } => {
                error!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Server error: {}",
                    reason
                );
            }
            ProxyError::Backend { .. } => {}
            ProxyError::MissingToken => {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Client error: {}",
                    message
                );
            }
            _ => {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Client error: {}",
                    message
                );
            }
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// =============================================================================
// Proxy Handler
// =============================================================================

/// Build the method router serving one [`ProxyRoute`].
///
/// Routes sharing a path are combined with [`MethodRouter::merge`]. The
/// router captures parameters by position (see [`ProxyRoute::router_path`]);
/// they are renamed to the template's names here.
pub fn proxy_endpoint<B: Backend>(route: &'static ProxyRoute) -> MethodRouter<AppState<B>> {
    let handler = move |State(state): State<AppState<B>>,
                        session: Session,
                        params: Result<Path<PathParams>, PathRejection>,
                        request: Request| async move {
        let params = path_params(route, params);
        forward(state, route, session, params, request).await
    };

    on(route.method.filter(), handler)
}

/// Rename positional captures, turning an undecodable segment into a JSON error.
fn path_params(
    route: &ProxyRoute,
    extracted: Result<Path<PathParams>, PathRejection>,
) -> Result<PathParams, ProxyError> {
    if route.param_names().next().is_none() {
        return Ok(PathParams::new());
    }

    match extracted {
        Ok(Path(positional)) => Ok(route.name_params(&positional)),
        Err(rejection) => Err(ProxyError::InvalidParameter {
            reason: rejection.body_text(),
        }),
    }
}

/// Proxy one request: auth and parameter checks, body rebuild, backend call.
async fn forward<B: Backend>(
    state: AppState<B>,
    route: &'static ProxyRoute,
    session: Session,
    params: Result<PathParams, ProxyError>,
    request: Request,
) -> Result<ProxyReply, ProxyError> {
    // The token check still comes first for an undecodable path.
    let params = match params {
        Ok(params) => params,
        Err(err) => {
            if route.auth == AuthRequirement::Required {
                session.require_token()?;
            }
            return Err(err);
        }
    };

    let call = state.proxy.authorize(route, &session, &params)?;
    let query = request.uri().query().map(str::to_string);
    let body = read_inbound(route.body, request).await?;

    state.proxy.dispatch(route, call, query, body).await
}

// =============================================================================
// Session Handlers
// =============================================================================

/// Handle login requests.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// The JSON body is forwarded to the backend. When the backend accepts the
/// credentials and its reply carries a `token` string, the token is stored
/// in the session cookie. The backend reply is relayed unchanged.
pub async fn login_handler<B: Backend>(
    State(state): State<AppState<B>>,
    jar: CookieJar,
    session: Session,
    request: Request,
) -> Result<(CookieJar, ProxyReply), ProxyError> {
    let call = state.proxy.authorize(&LOGIN, &session, &PathParams::new())?;
    let body = read_inbound(LOGIN.body, request).await?;
    let reply = state.proxy.dispatch(&LOGIN, call, None, body).await?;

    let token = reply
        .body
        .get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty());

    let jar = match token {
        Some(token) => {
            info!("Login accepted, issuing session cookie");
            jar.add(state.cookies.session_cookie(token))
        }
        None => {
            warn!("Login reply carried no token, session cookie not set");
            jar
        }
    };

    Ok((jar, reply))
}

/// Handle logout requests.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// Removes the session cookie. The backend is not contacted.
pub async fn logout_handler<B: Backend>(
    State(state): State<AppState<B>>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(state.cookies.removal_cookie());
    (jar, Json(json!({ "message": "Logged out" })))
}

/// Fallback for a known path hit with a method it does not serve.
///
/// `DELETE /api/trending/add` lands here: the static `add` segment wins over
/// the `{id}` capture of the remove route.
pub async fn method_not_allowed_handler() -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    debug!(status = status.as_u16(), "Client error: method not allowed");
    (
        status,
        Json(ErrorResponse::with_status(
            "method_not_allowed",
            "Method not allowed",
            status,
        )),
    )
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
