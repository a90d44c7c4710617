//! Reading inbound bodies and re-serializing them for the backend.
//!
//! JSON bodies are parsed and forwarded as values. Multipart bodies are never
//! forwarded as-is: each field named in the route's [`MultipartSchema`] is
//! copied into a fresh payload and everything else is dropped.

use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::backend::{FormField, FormValue, OutboundBody};
use crate::error::ProxyError;

use super::route::{BodyKind, MultipartSchema};

/// Read the inbound request body the way `kind` describes.
pub async fn read_inbound(kind: BodyKind, request: Request) -> Result<OutboundBody, ProxyError> {
    match kind {
        BodyKind::None => Ok(OutboundBody::Empty),
        BodyKind::Json => {
            let bytes = Bytes::from_request(request, &())
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            Ok(OutboundBody::Json(parse_json(&bytes)?))
        }
        BodyKind::Multipart(schema) => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            let fields = read_multipart(multipart).await?;
            Ok(OutboundBody::Multipart(select_fields(schema, fields)))
        }
    }
}

/// Map an extractor failure, keeping the size limit apart from bad input.
fn body_error(status: StatusCode, reason: String) -> ProxyError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::PayloadTooLarge { reason }
    } else {
        ProxyError::InvalidBody { reason }
    }
}

/// Parse a JSON request body. An empty body is an error.
pub fn parse_json(bytes: &[u8]) -> Result<Value, ProxyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ProxyError::InvalidBody {
            reason: "request body is empty".to_string(),
        });
    }

    serde_json::from_slice(bytes).map_err(|e| ProxyError::InvalidBody {
        reason: format!("malformed JSON: {}", e),
    })
}

/// Drain a multipart stream into fields.
///
/// Parts carrying a file name are kept as files; the rest as text.
async fn read_multipart(mut multipart: Multipart) -> Result<Vec<FormField>, ProxyError> {
    let mut fields = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let value = match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                FormValue::File {
                    file_name: Some(file_name),
                    content_type,
                    data,
                }
            }
            None => FormValue::Text(
                field
                    .text()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?,
            ),
        };

        fields.push(FormField { name, value });
    }

    Ok(fields)
}

/// Rebuild a multipart payload from the allow-listed fields.
///
/// Output follows the schema order. When a field appears twice the first
/// occurrence wins. Fields declared as files are forwarded as files even if
/// the client sent them without a file name.
pub fn select_fields(schema: &MultipartSchema, inbound: Vec<FormField>) -> Vec<FormField> {
    let mut kept: Vec<Option<FormField>> = schema.ordered_fields().map(|_| None).collect();

    for field in inbound {
        let Some(slot) = schema.ordered_fields().position(|name| name == field.name) else {
            debug!(field = %field.name, "Dropping multipart field not in allow-list");
            continue;
        };

        if kept[slot].is_some() {
            debug!(field = %field.name, "Ignoring repeated multipart field");
            continue;
        }

        let value = match field.value {
            FormValue::Text(text) if schema.is_file(&field.name) => FormValue::File {
                file_name: None,
                content_type: None,
                data: Bytes::from(text),
            },
            other => other,
        };

        kept[slot] = Some(FormField {
            name: field.name,
            value,
        });
    }

    kept.into_iter().flatten().collect()
}
