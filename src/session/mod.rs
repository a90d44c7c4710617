//! Cookie-backed session handling.
//!
//! The session token issued by the backend on login lives in a single
//! cookie, [`TOKEN_COOKIE`]. Nothing is stored server-side; the gateway only
//! reads the cookie, forwards it as a bearer token and lets the backend
//! decide whether it is still valid.
//!
//! - [`token_from_jar`] is the token accessor used everywhere
//! - [`Session`] threads the token into handlers as an extractor
//! - [`gate`] holds the navigation middleware

pub mod gate;

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::error::ProxyError;

pub use gate::{session_gate, GatePolicy};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Read the session token from a cookie jar.
///
/// An empty cookie value counts as no token.
pub fn token_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Session context for one request.
///
/// Extraction never fails; use [`Session::require_token`] in handlers that
/// need a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The token, or [`ProxyError::MissingToken`].
    pub fn require_token(&self) -> Result<&str, ProxyError> {
        self.token().ok_or(ProxyError::MissingToken)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Session::new(token_from_jar(&jar)))
    }
}

/// Attributes of the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    /// Send the `Secure` attribute
    pub secure: bool,

    /// `Max-Age` in seconds
    pub max_age: u32,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: true,
            max_age: crate::config::DEFAULT_SESSION_MAX_AGE,
        }
    }
}

impl CookieSettings {
    /// Build the cookie that stores a freshly issued token.
    pub fn session_cookie(&self, token: impl Into<String>) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token.into()))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .max_age(time::Duration::seconds(i64::from(self.max_age)))
            .build()
    }

    /// Cookie used to clear the session; must match the path it was set on.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, "")).path("/").build()
    }
}
