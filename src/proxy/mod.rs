//! Backend proxy layer.
//!
//! Every `/api/*` endpoint of the gateway is a [`ProxyRoute`]: a method, a
//! path template, an auth requirement, a body kind and a default failure
//! message. One generic handler serves them all through [`ProxyService`].
//!
//! ```text
//!  inbound request
//!        │
//!        ▼
//!  ProxyService::authorize   token? validator? path params?
//!        │
//!        ▼
//!  body::read_inbound        JSON parse / multipart allow-list
//!        │
//!        ▼
//!  ProxyService::dispatch    one Backend::send, interpret reply
//! ```

pub mod body;
pub mod resources;
pub mod route;
pub mod service;

pub use body::{parse_json, read_inbound, select_fields};
pub use route::{
    render_path, ApiMethod, AuthRequirement, BodyKind, MultipartSchema, ParamValidator, PathParams,
    ProxyRoute,
};
pub use service::{interpret, AuthorizedCall, ProxyReply, ProxyService};
