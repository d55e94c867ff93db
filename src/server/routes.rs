//! Router configuration for PrasoCam.
//!
//! This module defines the HTTP routes and applies middleware for CORS,
//! request tracing, and the upload body-size limit.
//!
//! # Route Structure
//!
//! ```text
//! /health          - Health check (public)
//! /prasocam.jpg    - GET: current snapshot (public)
//!                    PUT: publish snapshot (only registered when credentials
//!                         are configured)
//! ```
//!
//! The PUT route is registered only when both credential values are present;
//! otherwise the service is read-only and a PUT gets a routing-level 405
//! without ever entering the validator.

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::Credentials;
use super::handlers::{get_image_handler, health_handler, put_image_handler, AppState};
use crate::config::{Config, DEFAULT_CACHE_MAX_AGE, DEFAULT_IMAGE_FILE, DEFAULT_MAX_BODY_SIZE, IMAGE_FILE};

/// Route serving and accepting the snapshot image.
pub const IMAGE_ROUTE: &str = "/prasocam.jpg";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Publishing credentials; None runs the service read-only
    pub credentials: Option<Credentials>,

    /// Directory holding the snapshot and placeholder files
    pub image_dir: PathBuf,

    /// Cache-Control max-age in seconds for served images
    pub cache_max_age: u32,

    /// Maximum upload body size in bytes
    pub max_body_size: usize,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a read-only configuration serving images from `image_dir`.
    ///
    /// By default:
    /// - No credentials, so the PUT route is not registered
    /// - CORS allows any origin
    /// - Cache max-age is 12000 seconds
    /// - Upload limit is 512 KiB
    /// - Tracing is enabled
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            credentials: None,
            image_dir: image_dir.into(),
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Build a router configuration from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            credentials: config.credentials(),
            image_dir: config.image_dir.clone(),
            cache_max_age: config.cache_max_age,
            max_body_size: config.max_body_size,
            cors_origins: config.cors_origins.clone(),
            enable_tracing: !config.no_tracing,
        }
    }

    /// Set the publishing credentials, enabling the PUT route.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Set the maximum upload body size in bytes.
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Set specific allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Whether the configuration enables publishing.
    pub fn publishing_enabled(&self) -> bool {
        self.credentials.is_some()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// Builds the complete Axum router with:
/// - Public routes (snapshot GET, health check)
/// - The snapshot PUT route, only when credentials are configured
/// - Upload body-size limit
/// - CORS configuration
/// - Request tracing (optional)
pub fn create_router(config: RouterConfig) -> Router {
    let app_state = AppState {
        image_path: config.image_dir.join(IMAGE_FILE),
        default_image_path: config.image_dir.join(DEFAULT_IMAGE_FILE),
        cache_max_age: config.cache_max_age,
        credentials: config.credentials.clone(),
    };

    let cors = build_cors_layer(&config);

    let router = if config.publishing_enabled() {
        build_read_write_router(app_state, config.max_body_size)
    } else {
        build_read_only_router(app_state)
    };

    let router = router.route("/health", get(health_handler)).layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the router with both GET and PUT on the image route.
fn build_read_write_router(app_state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route(
            IMAGE_ROUTE,
            get(get_image_handler).put(put_image_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(app_state)
}

/// Build the read-only router: GET only, no PUT route at all.
fn build_read_only_router(app_state: AppState) -> Router {
    Router::new()
        .route(IMAGE_ROUTE, get(get_image_handler))
        .with_state(app_state)
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::HEAD, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
