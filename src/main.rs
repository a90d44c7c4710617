//! Course Portal - session-gated gateway for the course admin dashboard.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_portal::{
    config::Config,
    server::{create_router, RouterConfig},
    CookieSettings, HttpBackend, ProxyService,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let backend_url = match config.backend_base() {
        Ok(url) => url,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Course Portal v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Backend: {}", backend_url);
    info!("  Session cookie max-age: {}s", config.session_max_age);
    if config.cookie_secure {
        info!("  Session cookie: Secure");
    } else {
        warn!("  Session cookie: NOT Secure - only use this over plain-HTTP development setups");
    }
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS: disabled (same-origin only)"),
    }

    let backend = match HttpBackend::new(backend_url) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to build backend client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(ProxyService::new(backend), build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Admin login:");
    info!("    open http://{}/admin/login", addr);
    info!("  Health check:");
    info!("    curl http://{}/health", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "course_portal=debug,tower_http=debug"
    } else {
        "course_portal=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::default()
        .with_cookies(CookieSettings {
            secure: config.cookie_secure,
            max_age: config.session_max_age,
        })
        .with_max_body_bytes(config.max_body_bytes)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
