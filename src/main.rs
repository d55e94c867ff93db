//! PrasoCam - a single-endpoint snapshot camera service.
//!
//! This binary starts the HTTP server and wires up configuration.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prasocam::{
    config::Config,
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    // The snapshot directory must exist before the first PUT; the default
    // placeholder inside it is deployed out of band and never written here.
    if let Err(e) = tokio::fs::create_dir_all(&config.image_dir).await {
        error!(
            "Failed to create image directory {}: {}",
            config.image_dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let router_config = RouterConfig::from_config(&config);

    info!("Configuration:");
    info!("  Image directory: {}", config.image_dir.display());
    info!("  Cache max-age: {}s", config.cache_max_age);
    info!("  Upload limit: {} bytes", config.max_body_size);

    if let Some(credentials) = router_config.credentials.as_ref() {
        info!(
            "  Publishing: enabled for user '{}'",
            credentials.username()
        );
    } else {
        warn!("  Publishing: DISABLED - no credentials configured, service is read-only");
        warn!("        Set PRASO_USERNAME and PRASO_PASSWD to enable the PUT route");
    }

    let router = create_router(router_config);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!("  Snapshot endpoint: http://{}/prasocam.jpg", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "prasocam=debug,tower_http=debug"
    } else {
        "prasocam=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
