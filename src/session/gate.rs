//! Navigation gate for the admin pages.
//!
//! Runs once per request before any handler and decides from two signals,
//! whether a token cookie is present and whether the path is protected:
//!
//! | token | path            | outcome                     |
//! |-------|-----------------|-----------------------------|
//! | no    | protected       | redirect to the login page  |
//! | yes   | login page      | redirect to the dashboard   |
//! | any   | anything else   | pass through                |
//!
//! The gate only checks presence. It never calls the backend, so an expired
//! token is let through and rejected by the first proxied call the page
//! makes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use super::token_from_jar;

/// Login page path.
pub const LOGIN_PATH: &str = "/admin/login";

/// Dashboard home path.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Path prefixes that need a session.
pub const PROTECTED_PREFIXES: &[&str] = &["/admin/dashboard", "/admin/courses", "/admin/profile"];

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Paths the gate guards and where it sends people.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    pub protected_prefixes: Vec<String>,
    pub login_path: String,
    pub dashboard_path: String,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            protected_prefixes: PROTECTED_PREFIXES.iter().map(|p| p.to_string()).collect(),
            login_path: LOGIN_PATH.to_string(),
            dashboard_path: DASHBOARD_PATH.to_string(),
        }
    }
}

impl GatePolicy {
    /// Whether `path` falls under one of the protected prefixes.
    ///
    /// Matches whole segments: `/admin/courses/12` is protected,
    /// `/admin/coursesx` is not.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            match path.strip_prefix(prefix) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }

    pub fn is_login(&self, path: &str) -> bool {
        path == self.login_path
    }

    pub fn decide(&self, has_token: bool, path: &str) -> GateDecision {
        if !has_token && self.is_protected(path) {
            GateDecision::RedirectToLogin
        } else if has_token && self.is_login(path) {
            GateDecision::RedirectToDashboard
        } else {
            GateDecision::PassThrough
        }
    }
}

/// Axum middleware applying [`GatePolicy`] to every request.
///
/// ```ignore
/// let app = Router::new()
///     .route("/admin/dashboard", get(dashboard))
///     .layer(middleware::from_fn_with_state(GatePolicy::default(), session_gate));
/// ```
pub async fn session_gate(
    State(policy): State<GatePolicy>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let has_token = token_from_jar(&jar).is_some();
    let path = request.uri().path().to_string();

    match policy.decide(has_token, &path) {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::RedirectToLogin => {
            debug!(path = %path, "No session, redirecting to login");
            Redirect::temporary(&policy.login_path).into_response()
        }
        GateDecision::RedirectToDashboard => {
            debug!(path = %path, "Already signed in, redirecting to dashboard");
            Redirect::temporary(&policy.dashboard_path).into_response()
        }
    }
}
