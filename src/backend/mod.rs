//! Outbound seam to the remote backend API.
//!
//! The proxy never talks to the network directly. It hands a
//! [`BackendRequest`] to a [`Backend`] and gets a [`BackendResponse`] back:
//!
//! ```text
//! ┌──────────────┐   BackendRequest    ┌──────────────────────────┐
//! │ ProxyService │ ──────────────────▶ │ Backend (trait)          │
//! │              │ ◀────────────────── │  └─ HttpBackend (reqwest)│
//! └──────────────┘   BackendResponse   └──────────────────────────┘
//! ```
//!
//! A backend performs exactly one attempt per call. It reports any HTTP
//! status as a normal response; only failures to talk to the backend at all
//! surface as [`TransportError`].

mod client;

pub use client::HttpBackend;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::error::TransportError;

// =============================================================================
// Outbound Request
// =============================================================================

/// A single field of a rebuilt multipart payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Plain text field
    Text(String),

    /// Uploaded file
    File {
        file_name: Option<String>,
        content_type: Option<String>,
        data: Bytes,
    },
}

/// Named multipart field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutboundBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

impl OutboundBody {
    /// Names of the multipart fields, in order. Empty for other bodies.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            OutboundBody::Multipart(fields) => fields.iter().map(|f| f.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Request sent to the backend.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: Method,

    /// Path below the backend origin, starting with `/`
    pub path: String,

    /// Raw query string without the leading `?`
    pub query: Option<String>,

    /// Token sent as `Authorization: Bearer <token>`
    pub bearer: Option<String>,

    pub body: OutboundBody,
}

impl BackendRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            bearer: None,
            body: OutboundBody::Empty,
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn with_body(mut self, body: OutboundBody) -> Self {
        self.body = body;
        self
    }

    /// Path plus query string, as it appears on the wire.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

// =============================================================================
// Backend Response
// =============================================================================

/// Raw reply from the backend.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience constructor for a JSON reply.
    pub fn json(status: StatusCode, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Something that can execute a [`BackendRequest`].
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Perform one call. Non-2xx statuses are returned as `Ok`.
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, TransportError>;
}
