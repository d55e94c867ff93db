//! # PrasoCam
//!
//! A single-endpoint snapshot camera service.
//!
//! One authorized client publishes a periodically-refreshed JPEG image via
//! authenticated PUT; any number of anonymous viewers fetch the most recent
//! frame via GET. The whole service is a thin HTTP request-handling layer
//! around a single file on disk: no history, no database, no locking
//! (last writer wins).
//!
//! ## Features
//!
//! - **Authenticated publishing**: HTTP Basic auth behind a reverse proxy,
//!   with an `X-Forwarded-Proto: https` transport check
//! - **Two-stage content validation**: the declared `Content-Type` is checked
//!   in the validator, then the body's magic bytes are sniffed independently
//! - **Placeholder fallback**: GET serves a default image until the first
//!   snapshot is published
//! - **Read-only mode**: without configured credentials the PUT route is
//!   never registered
//!
//! ## Architecture
//!
//! - [`config`] - CLI and environment configuration
//! - [`error`] - error taxonomy for the publish path
//! - [`format`] - magic-byte sniffing for uploaded bodies
//! - [`server`] - Axum-based HTTP server, auth, and routes
//!
//! ## Example
//!
//! ```rust,no_run
//! use prasocam::{create_router, Credentials, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RouterConfig::new("./images")
//!         .with_credentials(Credentials::new("publisher", "secret"));
//!
//!     let router = create_router(config);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::PublishError;
pub use format::{is_jpeg, sniff_format, SniffedFormat};
pub use server::{
    basic_authorization, create_router, validate_put_request, AppState, Credentials,
    ErrorResponse, HealthResponse, RouterConfig, IMAGE_ROUTE,
};
