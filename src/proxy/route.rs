//! Route descriptors for the generic proxy handler.

use std::collections::HashMap;

use axum::routing::MethodFilter;
use http::Method;

use crate::error::ProxyError;

/// Path parameters captured by the router, keyed by name.
pub type PathParams = HashMap<String, String>;

/// Optional check run on the path parameters before anything is forwarded.
pub type ParamValidator = fn(&PathParams) -> Result<(), ProxyError>;

/// HTTP methods the proxied API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    /// Method sent to the backend.
    pub fn as_method(self) -> Method {
        match self {
            ApiMethod::Get => Method::GET,
            ApiMethod::Post => Method::POST,
            ApiMethod::Put => Method::PUT,
            ApiMethod::Delete => Method::DELETE,
        }
    }

    /// Filter the route is registered under.
    pub fn filter(self) -> MethodFilter {
        match self {
            ApiMethod::Get => MethodFilter::GET,
            ApiMethod::Post => MethodFilter::POST,
            ApiMethod::Put => MethodFilter::PUT,
            ApiMethod::Delete => MethodFilter::DELETE,
        }
    }
}

/// Whether a route needs the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// Token must be present; it is forwarded as a bearer token
    Required,
    /// Token is forwarded when present
    Optional,
    /// Token is never forwarded
    Public,
}

/// Multipart fields a route forwards. Everything else is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultipartSchema {
    pub text_fields: &'static [&'static str],
    pub file_fields: &'static [&'static str],
}

impl MultipartSchema {
    pub fn allows(&self, name: &str) -> bool {
        self.text_fields.contains(&name) || self.file_fields.contains(&name)
    }

    pub fn is_file(&self, name: &str) -> bool {
        self.file_fields.contains(&name)
    }

    /// Allowed field names in forwarding order: text fields, then files.
    pub fn ordered_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.text_fields.iter().chain(self.file_fields.iter()).copied()
    }
}

/// How the inbound body is read and re-serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Body ignored, nothing forwarded
    None,
    /// JSON body, parsed and re-serialized
    Json,
    /// Multipart body, rebuilt through the schema
    Multipart(&'static MultipartSchema),
}

/// One proxied endpoint.
///
/// `path` is both the route registered on the gateway and the template for
/// the backend path, since the backend mirrors the gateway's API surface.
#[derive(Debug)]
pub struct ProxyRoute {
    /// Short name used in logs
    pub name: &'static str,
    pub method: ApiMethod,
    /// Path template with `{param}` segments
    pub path: &'static str,
    pub auth: AuthRequirement,
    pub body: BodyKind,
    /// Message used when the backend fails without one of its own
    pub failure_message: &'static str,
    pub validate: Option<ParamValidator>,
}

impl ProxyRoute {
    /// Render the backend path for the given parameters.
    pub fn backend_path(&self, params: &PathParams) -> Result<String, ProxyError> {
        render_path(self.path, params)
    }

    /// Parameter names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &'static str> {
        let path: &'static str = self.path;
        path.split('/').filter_map(param_name)
    }

    /// Pattern registered on the router.
    ///
    /// Parameters are renamed by position (`{p0}`, `{p1}`, ...) because the
    /// router cannot hold differently named parameters at the same position,
    /// e.g. `/api/enrollments/{id}` next to `/api/enrollments/{action}/{id}`.
    pub fn router_path(&self) -> String {
        let mut position = 0;
        self.path
            .split('/')
            .map(|segment| match param_name(segment) {
                Some(_) => {
                    let positional = format!("{{p{}}}", position);
                    position += 1;
                    positional
                }
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Map positional router captures back to the template's names.
    pub fn name_params(&self, positional: &PathParams) -> PathParams {
        self.param_names()
            .enumerate()
            .filter_map(|(position, name)| {
                positional
                    .get(&format!("p{}", position))
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect()
    }
}

/// `name` for a `{name}` segment.
fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// Substitute `{name}` segments of `template` with percent-encoded values.
///
/// A missing or blank value is a [`ProxyError::MissingParameter`].
pub fn render_path(template: &str, params: &PathParams) -> Result<String, ProxyError> {
    let mut rendered = String::with_capacity(template.len());

    for (index, segment) in template.split('/').enumerate() {
        if index > 0 {
            rendered.push('/');
        }

        match param_name(segment) {
            Some(name) => {
                let value = params
                    .get(name)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| ProxyError::MissingParameter {
                        name: name.to_string(),
                    })?;
                rendered.push_str(&urlencoding::encode(value));
            }
            None => rendered.push_str(segment),
        }
    }

    Ok(rendered)
}
