//! Configuration management for PrasoCam.
//!
//! Configuration is read once at startup and passed explicitly into the
//! server constructors; request-handling code never reads ambient state.
//!
//! # Environment Variables
//!
//! - `PORT` - Server port (default: 5000)
//! - `PRASO_USERNAME` - Username for publishing; PUT is disabled when unset
//! - `PRASO_PASSWD` - Password for publishing; PUT is disabled when unset
//! - `PRASO_HOST` - Server bind address (default: 0.0.0.0)
//! - `PRASO_IMAGE_DIR` - Directory holding the snapshot files (default: ./images)
//! - `PRASO_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 12000)
//! - `PRASO_MAX_BODY_SIZE` - Maximum upload size in bytes (default: 512 KiB)
//! - `PRASO_CORS_ORIGINS` - Allowed CORS origins (comma-separated)

use std::path::PathBuf;

use clap::Parser;

use crate::server::auth::Credentials;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory holding the snapshot files.
pub const DEFAULT_IMAGE_DIR: &str = "./images";

/// File name of the current snapshot, overwritten on every successful PUT.
pub const IMAGE_FILE: &str = "prasocam.jpg";

/// File name of the placeholder served when no snapshot has been published.
/// Never written by this service.
pub const DEFAULT_IMAGE_FILE: &str = "prasocam_default.jpg";

/// Default HTTP cache max-age in seconds.
pub const DEFAULT_CACHE_MAX_AGE: u32 = 12000;

/// Default maximum upload body size in bytes (512 KiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 512 * 1024;

// =============================================================================
// CLI Arguments
// =============================================================================

/// PrasoCam - a single-endpoint snapshot camera service.
///
/// One authorized client publishes a periodically-refreshed JPEG via
/// authenticated PUT; any number of anonymous viewers fetch the latest
/// frame via GET.
#[derive(Parser, Debug, Clone)]
#[command(name = "prasocam")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "PRASO_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Username required to publish a snapshot.
    ///
    /// If either credential is missing, the PUT route is never registered
    /// and the service runs read-only.
    #[arg(long, env = "PRASO_USERNAME")]
    pub username: Option<String>,

    /// Password required to publish a snapshot.
    #[arg(long, env = "PRASO_PASSWD", hide_env_values = true)]
    pub password: Option<String>,

    /// Directory holding the current snapshot and the default placeholder.
    #[arg(long, default_value = DEFAULT_IMAGE_DIR, env = "PRASO_IMAGE_DIR")]
    pub image_dir: PathBuf,

    /// HTTP Cache-Control max-age in seconds for served images.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "PRASO_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Maximum upload body size in bytes. Larger bodies are rejected
    /// before validation runs.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE, env = "PRASO_MAX_BODY_SIZE")]
    pub max_body_size: usize,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "PRASO_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_size == 0 {
            return Err("max_body_size must be greater than 0".to_string());
        }

        // A lone username or lone password is almost certainly a deployment
        // mistake rather than an intentional read-only setup.
        if self.username.is_some() != self.password.is_some() {
            return Err(
                "Both PRASO_USERNAME and PRASO_PASSWD must be set to enable publishing, \
                 or neither to run read-only"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the publishing credentials, if both values are present and
    /// non-empty.
    pub fn credentials(&self) -> Option<Credentials> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials::new(username, password))
            }
            _ => None,
        }
    }

    /// Path of the current snapshot file.
    pub fn image_path(&self) -> PathBuf {
        self.image_dir.join(IMAGE_FILE)
    }

    /// Path of the default placeholder image.
    pub fn default_image_path(&self) -> PathBuf {
        self.image_dir.join(DEFAULT_IMAGE_FILE)
    }
}

// =============================================================================
// Tests
// =============================================================================
