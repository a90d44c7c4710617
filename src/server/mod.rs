//! HTTP server layer for the course portal gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │            session gate ─▶ pages | /api/* proxy                 │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    pages    │  │        routes           │  │
//! │  │ (proxy/auth)│  │ (html shell)│  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod pages;
pub mod routes;

pub use handlers::{
    health_handler, login_handler, logout_handler, method_not_allowed_handler, proxy_endpoint,
    AppState, ErrorResponse, HealthResponse,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_BODY_BYTES};
