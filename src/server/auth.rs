//! Basic authentication and PUT request validation.
//!
//! Publishing requires HTTP Basic authentication over HTTPS. The service
//! itself sees a plain connection from the reverse proxy, so transport
//! security is checked via the `X-Forwarded-Proto` header the proxy sets.
//!
//! # Validation Order
//!
//! [`validate_put_request`] runs a fixed sequence of checks and stops at the
//! first failure. The order is a documented contract: a request violating
//! several rules always gets the error of the earliest failing check.
//!
//! 1. Missing headers collection - `BadRequest("Missing Headers")`
//! 2. `X-Forwarded-Proto` absent or not `https` - `Unauthorized("https required")`
//! 3. Missing `Authorization` header - `BadRequest("Missing Authorization Header")`
//! 4. Scheme absent or not `Basic` - `Unauthorized("Wrong scheme")`
//! 5. Basic payload absent or undecodable - `InvalidCredentials("Credentials not provided")`
//! 6. Username empty or mismatched - `InvalidCredentials("Wrong username")`
//! 7. Password empty or mismatched - `InvalidCredentials("Wrong password")`
//! 8. Declared content type not jpg/jpeg - `InvalidContent("Not jpeg")`
//!
//! Credential comparison is constant-time (`subtle::ConstantTimeEq`) so the
//! comparison itself leaks nothing about where a mismatch occurs. The
//! username and password checks still short-circuit, per the contract above.

use axum::http::{header, HeaderMap};
use base64::prelude::*;
use subtle::ConstantTimeEq;

use crate::error::PublishError;

// =============================================================================
// Credentials
// =============================================================================

/// Header carrying the client-facing protocol as seen by the reverse proxy.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The static credential pair required to publish a snapshot.
///
/// Built once from configuration at startup and never mutated afterwards,
/// so it needs no synchronization.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a new credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    fn username_matches(&self, candidate: &str) -> bool {
        self.username.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

// Manual Debug so the password never lands in a log line.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Build an `Authorization: Basic` header value for the given credentials.
///
/// Used by clients and tests; the server only ever decodes.
pub fn basic_authorization(username: &str, password: &str) -> String {
    let payload = BASE64_STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", payload)
}

// =============================================================================
// Request Validation
// =============================================================================

/// Validate a PUT request against the configured credentials.
///
/// `headers` is `None` when the caller has no header collection at all,
/// which fails the first check. Returns `Ok(())` when every check passes,
/// otherwise the error of the first failing check (see module docs for the
/// full ordered contract).
pub fn validate_put_request(
    headers: Option<&HeaderMap>,
    credentials: &Credentials,
) -> Result<(), PublishError> {
    let headers = headers.ok_or_else(|| PublishError::bad_request("Missing Headers"))?;

    let proto = headers.get(FORWARDED_PROTO).and_then(|v| v.to_str().ok());
    if proto != Some("https") {
        return Err(PublishError::unauthorized("https required"));
    }

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| PublishError::bad_request("Missing Authorization Header"))?;

    let (scheme, payload) = match authorization.split_once(' ') {
        Some((scheme, payload)) => (scheme, Some(payload.trim())),
        None => (authorization, None),
    };
    if scheme != "Basic" {
        return Err(PublishError::unauthorized("Wrong scheme"));
    }

    let (username, password) = decode_basic_payload(payload)
        .ok_or_else(|| PublishError::invalid_credentials("Credentials not provided"))?;

    if username.is_empty() || !credentials.username_matches(&username) {
        return Err(PublishError::invalid_credentials("Wrong username"));
    }
    if password.is_empty() || !credentials.password_matches(&password) {
        return Err(PublishError::invalid_credentials("Wrong password"));
    }

    if !declares_jpeg(headers) {
        return Err(PublishError::invalid_content("Not jpeg"));
    }

    Ok(())
}

/// Decode the base64 payload of a Basic authorization header into a
/// `(username, password)` pair.
///
/// Returns `None` for a missing or empty payload, invalid base64, invalid
/// UTF-8, or a decoded string without the `:` separator.
fn decode_basic_payload(payload: Option<&str>) -> Option<(String, String)> {
    let payload = payload.filter(|p| !p.is_empty())?;
    let raw = BASE64_STANDARD.decode(payload).ok()?;
    let decoded = String::from_utf8(raw).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Check whether the declared `Content-Type` names a JPEG.
///
/// Accepts `image/jpeg` and `image/jpg` (plus bare `jpeg`/`jpg` subtypes),
/// ignoring any media-type parameters. This is only the declared type; the
/// upload handler separately sniffs the body's magic bytes.
fn declares_jpeg(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or("").trim();
    let subtype = essence.rsplit('/').next().unwrap_or(essence);
    subtype.eq_ignore_ascii_case("jpeg") || subtype.eq_ignore_ascii_case("jpg")
}

// =============================================================================
// Tests
// =============================================================================
