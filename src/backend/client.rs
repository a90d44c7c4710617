//! reqwest-backed implementation of [`Backend`].

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::TransportError;

use super::{Backend, BackendRequest, BackendResponse, FormField, FormValue, OutboundBody};

/// Backend reached over HTTP at a single configured origin.
///
/// The origin may carry a path prefix (`https://host/v2`); request paths are
/// appended to it. No request timeout is set, so a hung backend call waits
/// until the client disconnects.
///
/// # Example
///
/// ```ignore
/// use course_portal::backend::HttpBackend;
///
/// let backend = HttpBackend::new(Url::parse("http://localhost:5000")?)?;
/// ```
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for the given origin.
    pub fn new(base_url: Url) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("course-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend around an existing reqwest client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// The origin requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request.
    pub fn url_for(&self, request: &BackendRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, TransportError> {
        let url = self.url_for(&request);
        debug!(method = %request.method, url = %url, "Forwarding to backend");

        let mut builder = self.client.request(request.method.clone(), &url);

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match request.body {
            OutboundBody::Empty => builder,
            OutboundBody::Json(value) => builder.json(&value),
            OutboundBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Backend replied");

        Ok(BackendResponse { status, body })
    }
}

/// Convert rebuilt fields into a reqwest multipart form.
fn build_form(fields: Vec<FormField>) -> Result<Form, TransportError> {
    let mut form = Form::new();

    for field in fields {
        form = match field.value {
            FormValue::Text(text) => form.text(field.name, text),
            FormValue::File {
                file_name,
                content_type,
                data,
            } => {
                let mut part = Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    part = part.file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|e| TransportError::Build(e.to_string()))?;
                }
                form.part(field.name, part)
            }
        };
    }

    Ok(form)
}
