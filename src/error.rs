use http::StatusCode;
use thiserror::Error;

/// Generic message returned for transport failures. Never a backend-supplied
/// message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Internal server error";

/// Errors raised while proxying a request to the backend
#[derive(Debug, Clone, Error)]
pub enum ProxyError {
    /// Route requires a session token and none was present
    #[error("Unauthorized")]
    MissingToken,

    /// A path parameter the backend path needs is missing or blank
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// A path parameter could not be decoded
    #[error("Invalid path parameter: {reason}")]
    InvalidParameter { reason: String },

    /// Enrollment action outside the accepted set
    #[error("Invalid action: {action} (expected \"approve\" or \"reject\")")]
    InvalidAction { action: String },

    /// Inbound body could not be read or parsed
    #[error("Invalid request body: {reason}")]
    InvalidBody { reason: String },

    /// Inbound body exceeds the configured limit
    #[error("Request body too large: {reason}")]
    PayloadTooLarge { reason: String },

    /// Backend answered with a non-success status
    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    /// Network failure or unreadable backend reply
    #[error("Transport error: {reason}")]
    Transport { reason: String },
}

impl ProxyError {
    /// HTTP status this error is surfaced with.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken => StatusCode::UNAUTHORIZED,
            ProxyError::MissingParameter { .. }
            | ProxyError::InvalidParameter { .. }
            | ProxyError::InvalidAction { .. }
            | ProxyError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Backend { status, .. } => *status,
            ProxyError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingToken => "unauthorized",
            ProxyError::MissingParameter { .. } => "missing_parameter",
            ProxyError::InvalidParameter { .. } => "invalid_parameter",
            ProxyError::InvalidAction { .. } => "invalid_action",
            ProxyError::InvalidBody { .. } => "invalid_body",
            ProxyError::PayloadTooLarge { .. } => "payload_too_large",
            ProxyError::Backend { .. } => "backend_error",
            ProxyError::Transport { .. } => "internal_error",
        }
    }

    /// Message shown to the caller.
    ///
    /// Transport details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::Transport { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Transport-level failure from a [`Backend`](crate::backend::Backend)
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Could not connect or the connection broke mid-request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Outbound request could not be assembled
    #[error("Request build error: {0}")]
    Build(String),

    /// Response body could not be read
    #[error("Body read error: {0}")]
    Body(String),
}

impl From<TransportError> for ProxyError {
    fn from(err: TransportError) -> Self {
        ProxyError::Transport {
            reason: err.to_string(),
        }
    }
}

/// Configuration errors detected at startup
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Backend URL is required. Set --backend-url or PORTAL_BACKEND_URL")]
    MissingBackendUrl,

    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("port must be greater than 0")]
    InvalidPort,

    #[error("session_max_age must be greater than 0")]
    InvalidSessionMaxAge,

    #[error("max_body_bytes must be greater than 0")]
    InvalidBodyLimit,
}
