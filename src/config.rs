//! Configuration management for the course portal gateway.
//!
//! Configuration comes from:
//! - Command-line arguments via clap
//! - Environment variables with `PORTAL_` prefix
//! - Defaults for everything except the backend URL
//!
//! # Example
//!
//! ```ignore
//! use course_portal::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! println!("Proxying to {}", config.backend_url);
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_HOST` - Server bind address (default: 0.0.0.0)
//! - `PORTAL_PORT` - Server port (default: 3000)
//! - `PORTAL_BACKEND_URL` - Origin of the backend API (required)
//! - `PORTAL_COOKIE_SECURE` - Mark the session cookie `Secure` (default: true)
//! - `PORTAL_SESSION_MAX_AGE` - Session cookie max-age seconds (default: 3600)
//! - `PORTAL_CORS_ORIGINS` - Allowed CORS origins, comma-separated
//! - `PORTAL_MAX_BODY_BYTES` - Request body limit in bytes (default: 10 MiB)

use clap::Parser;
use url::Url;

use crate::error::ConfigError;
use crate::server::DEFAULT_MAX_BODY_BYTES;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default session cookie max-age in seconds (1 hour).
pub const DEFAULT_SESSION_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Course Portal - session-gated gateway for the course admin dashboard.
///
/// Serves the admin shells, redirects unauthenticated navigation to the login
/// page and proxies `/api/*` calls to the backend with the session token.
#[derive(Parser, Debug, Clone)]
#[command(name = "course-portal")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "PORTAL_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORTAL_PORT")]
    pub port: u16,

    // =========================================================================
    // Backend Configuration
    // =========================================================================
    /// Origin of the backend API, e.g. `https://api.example.com`.
    ///
    /// Every proxied route is forwarded to the same path under this origin.
    #[arg(long, env = "PORTAL_BACKEND_URL")]
    pub backend_url: String,

    // =========================================================================
    // Session Configuration
    // =========================================================================
    /// Mark the session cookie `Secure`.
    ///
    /// Only disable for plain-HTTP local development.
    #[arg(long, default_value_t = true, env = "PORTAL_COOKIE_SECURE")]
    pub cookie_secure: bool,

    /// Session cookie max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_SESSION_MAX_AGE, env = "PORTAL_SESSION_MAX_AGE")]
    pub session_max_age: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, no CORS headers are sent (same-origin only).
    #[arg(long, env = "PORTAL_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Maximum request body size in bytes, covering multipart uploads.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, env = "PORTAL_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_base()?;

        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.session_max_age == 0 {
            return Err(ConfigError::InvalidSessionMaxAge);
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit);
        }

        Ok(())
    }

    /// Parse the backend URL into an absolute http(s) origin.
    pub fn backend_base(&self) -> Result<Url, ConfigError> {
        parse_backend_url(&self.backend_url)
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse and check a backend origin.
pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBackendUrl);
    }

    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBackendUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidBackendUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBackendUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

// =============================================================================
// Tests
// =============================================================================
