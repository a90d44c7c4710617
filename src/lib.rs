//! # Course Portal
//!
//! A session-gated gateway for a course marketplace admin dashboard.
//!
//! The gateway sits between the browser and the backend API. It keeps the
//! backend-issued session token in an HTTP-only cookie, keeps anonymous
//! visitors out of the admin pages, and forwards `/api/*` calls to the backend
//! with the token attached as a bearer credential.
//!
//! ## Features
//!
//! - **Session gate**: redirects unauthenticated navigation to the login page,
//!   and signed-in visitors away from it
//! - **Generic proxy**: one handler serves every backend resource, driven by
//!   a table of route descriptors
//! - **Multipart allow-lists**: uploads are rebuilt from a fixed set of fields
//! - **Uniform errors**: backend failures relay their status and message;
//!   transport failures become a generic 500
//!
//! ## Architecture
//!
//! - [`session`] - token accessor, session extractor, session gate middleware
//! - [`proxy`] - route descriptors, resource table, body handling, dispatch
//! - [`backend`] - outbound seam and its reqwest implementation
//! - [`server`] - Axum handlers, HTML shells and router
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use course_portal::{create_router, HttpBackend, ProxyService, RouterConfig};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(Url::parse("http://localhost:5000")?)?;
//!     let router = create_router(ProxyService::new(backend), RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod proxy;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use backend::{
    Backend, BackendRequest, BackendResponse, FormField, FormValue, HttpBackend, OutboundBody,
};
pub use config::Config;
pub use error::{ConfigError, ProxyError, TransportError, GENERIC_FAILURE_MESSAGE};
pub use proxy::{
    ApiMethod, AuthRequirement, BodyKind, MultipartSchema, PathParams, ProxyReply, ProxyRoute,
    ProxyService,
};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
pub use session::{
    session_gate, token_from_jar, CookieSettings, GatePolicy, Session, TOKEN_COOKIE,
};
