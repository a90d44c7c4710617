//! Router configuration for the course portal gateway.
//!
//! # Route Structure
//!
//! ```text
//! /                         - Landing page (public)
//! /admin/login              - Login page (redirects to dashboard when signed in)
//! /admin/dashboard|courses|profile
//!                           - Admin pages (gated on the session cookie)
//! /api/auth/login|logout    - Session handlers
//! /api/...                  - Proxied to the backend (see proxy::resources)
//! /health                   - Health check
//! ```
//!
//! Layers, outermost first: request tracing, CORS, session gate, body limit.
//!
//! # Example
//!
//! ```ignore
//! use course_portal::{create_router, HttpBackend, ProxyService, RouterConfig};
//!
//! let backend = HttpBackend::new(Url::parse("http://localhost:5000")?)?;
//! let router = create_router(ProxyService::new(backend), RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, login_handler, logout_handler, method_not_allowed_handler, proxy_endpoint,
    AppState,
};
use super::pages::{courses_page, dashboard_page, landing_page, login_page, profile_page};
use crate::backend::Backend;
use crate::proxy::resources::{LOGIN, ROUTES};
use crate::proxy::ProxyService;
use crate::session::{session_gate, CookieSettings, GatePolicy};

/// Default request body limit (10 MiB), sized for course thumbnails.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Session cookie attributes
    pub cookies: CookieSettings,

    /// Paths guarded by the session gate
    pub gate: GatePolicy,

    /// Allowed CORS origins (None = no CORS layer, same-origin only)
    pub cors_origins: Option<Vec<String>>,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    /// Secure cookies with a one hour max-age, default gate paths, no CORS,
    /// 10 MiB body limit, tracing on.
    fn default() -> Self {
        Self {
            cookies: CookieSettings::default(),
            gate: GatePolicy::default(),
            cors_origins: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    pub fn with_cookies(mut self, cookies: CookieSettings) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_gate(mut self, gate: GatePolicy) -> Self {
        self.gate = gate;
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Credentials are allowed so the session cookie travels cross-origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `proxy` - The proxy service forwarding `/api/*` calls
/// * `config` - Router configuration
pub fn create_router<B: Backend>(proxy: ProxyService<B>, config: RouterConfig) -> Router {
    let state = AppState::new(proxy).with_cookies(config.cookies);

    let mut router = Router::new();
    for (path, endpoint) in proxy_endpoints::<B>() {
        router = router.route(&path, endpoint);
    }

    let router = router
        .route(LOGIN.path, post(login_handler::<B>))
        .route("/api/auth/logout", post(logout_handler::<B>))
        .route("/health", get(health_handler))
        .route("/", get(landing_page))
        .route("/admin/login", get(login_page))
        .route("/admin/dashboard", get(dashboard_page))
        .route("/admin/courses", get(courses_page))
        .route("/admin/profile", get(profile_page))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            config.gate.clone(),
            session_gate,
        ));

    let router = match build_cors_layer(&config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// One method router per proxied path, merging routes that share a path.
fn proxy_endpoints<B: Backend>() -> BTreeMap<String, MethodRouter<AppState<B>>> {
    let mut endpoints: BTreeMap<String, MethodRouter<AppState<B>>> = BTreeMap::new();

    for route in ROUTES {
        let path = route.router_path();
        let endpoint = proxy_endpoint::<B>(route);
        let merged = match endpoints.remove(&path) {
            Some(existing) => existing.merge(endpoint),
            None => endpoint,
        };
        endpoints.insert(path, merged);
    }

    endpoints
}

/// Build the CORS layer, if origins are configured.
fn build_cors_layer(config: &RouterConfig) -> Option<CorsLayer> {
    let origins = config.cors_origins.as_ref()?;

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    if parsed_origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(parsed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(Duration::from_secs(86400)),
    )
}

// =============================================================================
// Tests
// =============================================================================
