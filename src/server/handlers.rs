//! HTTP request handlers for the PrasoCam snapshot API.
//!
//! # Endpoints
//!
//! - `GET /prasocam.jpg` - Serve the current snapshot (public)
//! - `PUT /prasocam.jpg` - Publish a new snapshot (authenticated)
//! - `GET /health` - Health check endpoint

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::PublishError;
use crate::format::is_jpeg;

use super::auth::{validate_put_request, Credentials};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// Everything in here is immutable for the lifetime of the process; the only
/// mutable resource is the snapshot file on disk, accessed without locking
/// (last writer wins, single-writer use case).
#[derive(Clone)]
pub struct AppState {
    /// Path of the current snapshot file, overwritten on every PUT
    pub image_path: PathBuf,

    /// Path of the placeholder served when no snapshot exists
    pub default_image_path: PathBuf,

    /// Cache-Control max-age in seconds for served images
    pub cache_max_age: u32,

    /// Publishing credentials; None means the PUT route was never registered
    pub credentials: Option<Credentials>,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "unauthorized", "invalid_content")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert PublishError to HTTP response.
///
/// 5xx errors are logged at ERROR level, credential failures at WARN (they
/// may indicate probing), remaining client errors at DEBUG.
impl IntoResponse for PublishError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PublishError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            PublishError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            PublishError::InvalidCredentials(_) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials")
            }
            PublishError::InvalidContent(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "invalid_content")
            }
            PublishError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if matches!(self, PublishError::InvalidCredentials(_)) {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                message
            );
        } else {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle snapshot upload requests.
///
/// # Endpoint
///
/// `PUT /prasocam.jpg`
///
/// # Request
///
/// - `X-Forwarded-Proto: https` (set by the reverse proxy)
/// - `Authorization: Basic <base64(user:pass)>`
/// - `Content-Type: image/jpeg`
/// - Body: raw JPEG bytes, at most the configured size limit
///
/// # Response
///
/// - `201 Created` with body `"File written"` on success
/// - `400 Bad Request`: missing request metadata
/// - `401 Unauthorized`: transport, scheme, or credential failure
/// - `413 Payload Too Large`: body exceeds the size limit (rejected by the
///   body-limit layer before this handler runs)
/// - `415 Unsupported Media Type`: declared type or sniffed magic bytes not JPEG
/// - `500 Internal Server Error`: file write failure
pub async fn put_image_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, PublishError> {
    // The route is only registered when credentials are configured.
    let Some(credentials) = state.credentials.as_ref() else {
        return Err(PublishError::internal("Publishing is not configured"));
    };

    validate_put_request(Some(&headers), credentials)?;

    // The declared content type passed validation above; the body itself
    // still has to carry the JPEG magic bytes.
    if body.is_empty() || !is_jpeg(&body) {
        return Err(PublishError::invalid_content("Missing Body or body Not JPG"));
    }

    tokio::fs::write(&state.image_path, &body)
        .await
        .map_err(|e| PublishError::internal(e.to_string()))?;

    info!(
        path = %state.image_path.display(),
        bytes = body.len(),
        "Snapshot written"
    );

    Ok((StatusCode::CREATED, "File written").into_response())
}

/// Handle snapshot fetch requests.
///
/// # Endpoint
///
/// `GET /prasocam.jpg`
///
/// No authentication. Serves the current snapshot if present, otherwise the
/// configured placeholder image. Responds 404 only when neither file exists.
///
/// # Headers
///
/// - `Content-Type: image/jpeg`
/// - `Cache-Control: public, max-age={cache_max_age}`
pub async fn get_image_handler(State(state): State<AppState>) -> Response {
    let bytes = match read_with_fallback(&state).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.cache_max_age),
        )
        .body(Body::from(bytes))
        .unwrap()
}

/// Read the snapshot, falling back to the placeholder when it is absent.
async fn read_with_fallback(state: &AppState) -> Result<Vec<u8>, Response> {
    match tokio::fs::read(&state.image_path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(
                path = %state.image_path.display(),
                "No snapshot published yet, serving default image"
            );
            match tokio::fs::read(&state.default_image_path).await {
                Ok(bytes) => Ok(bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    let status = StatusCode::NOT_FOUND;
                    let error_response =
                        ErrorResponse::with_status("not_found", "No image available", status);
                    Err((status, Json(error_response)).into_response())
                }
                Err(e) => Err(PublishError::internal(e.to_string()).into_response()),
            }
        }
        Err(e) => Err(PublishError::internal(e.to_string()).into_response()),
    }
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always returns 200 with the service status and version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
