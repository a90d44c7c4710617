//! Executes proxy routes against a backend.
//!
//! A call goes through two steps so the cheap checks happen before the
//! inbound body is touched:
//!
//! ```text
//! authorize()                          dispatch()
//!  1. token per AuthRequirement         4. build BackendRequest
//!  2. route validator                   5. one call to the Backend
//!  3. render backend path               6. interpret status + body
//! ```

use http::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::backend::{Backend, BackendRequest, BackendResponse, OutboundBody};
use crate::error::ProxyError;
use crate::session::Session;

use super::route::{AuthRequirement, PathParams, ProxyRoute};

// =============================================================================
// Call Types
// =============================================================================

/// A route call that passed the auth and parameter checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedCall {
    /// Rendered backend path
    pub path: String,

    /// Token to forward, if any
    pub bearer: Option<String>,
}

/// Successful backend reply relayed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: Value,
}

// =============================================================================
// Proxy Service
// =============================================================================

/// Runs [`ProxyRoute`]s against a [`Backend`].
///
/// Stateless apart from the backend handle; every call is independent and
/// makes at most one backend request. No retries.
pub struct ProxyService<B: Backend> {
    backend: B,
}

impl<B: Backend> ProxyService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Check the session and parameters for `route` without any I/O.
    pub fn authorize(
        &self,
        route: &ProxyRoute,
        session: &Session,
        params: &PathParams,
    ) -> Result<AuthorizedCall, ProxyError> {
        let bearer = match route.auth {
            AuthRequirement::Required => match session.require_token() {
                Ok(token) => Some(token.to_string()),
                Err(err) => {
                    debug!(route = route.name, "Rejected: no session token");
                    return Err(err);
                }
            },
            AuthRequirement::Optional => session.token().map(str::to_string),
            AuthRequirement::Public => None,
        };

        if let Some(validate) = route.validate {
            validate(params)?;
        }

        let path = route.backend_path(params)?;

        Ok(AuthorizedCall { path, bearer })
    }

    /// Forward an authorized call and interpret the backend's reply.
    pub async fn dispatch(
        &self,
        route: &ProxyRoute,
        call: AuthorizedCall,
        query: Option<String>,
        body: OutboundBody,
    ) -> Result<ProxyReply, ProxyError> {
        let request = BackendRequest::new(route.method.as_method(), call.path)
            .with_query(query)
            .with_bearer(call.bearer)
            .with_body(body);

        let response = self.backend.send(request).await.map_err(|e| {
            error!(route = route.name, error = %e, "Backend call failed");
            ProxyError::from(e)
        })?;

        interpret(route, response)
    }

    /// Authorize and dispatch in one go.
    pub async fn execute(
        &self,
        route: &ProxyRoute,
        session: &Session,
        params: &PathParams,
        query: Option<String>,
        body: OutboundBody,
    ) -> Result<ProxyReply, ProxyError> {
        let call = self.authorize(route, session, params)?;
        self.dispatch(route, call, query, body).await
    }
}

/// Turn a backend reply into the relayed result.
///
/// - 2xx: body relayed as JSON, an empty body becomes `{}`
/// - 2xx with a body that is not JSON: transport error
/// - anything else: backend error carrying the backend's `message`, or the
///   route's default message
pub fn interpret(route: &ProxyRoute, response: BackendResponse) -> Result<ProxyReply, ProxyError> {
    let status = response.status;

    if status.is_success() {
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProxyReply {
                status,
                body: json!({}),
            });
        }

        let body = serde_json::from_slice(&response.body).map_err(|e| {
            error!(route = route.name, error = %e, "Backend returned malformed JSON");
            ProxyError::Transport {
                reason: format!("malformed backend response: {}", e),
            }
        })?;

        return Ok(ProxyReply { status, body });
    }

    let message = backend_message(&response.body)
        .unwrap_or_else(|| route.failure_message.to_string());

    warn!(
        route = route.name,
        status = status.as_u16(),
        "Backend reported failure: {}",
        message
    );

    Err(ProxyError::Backend { status, message })
}

/// Non-empty `message` string from a JSON error body.
fn backend_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
