use thiserror::Error;

/// Errors produced by the publish (PUT) path.
///
/// The request validator returns exactly one of these per request, chosen by
/// the first failing check; the upload handler adds content and I/O failures.
/// HTTP status mapping lives in the server layer ([`crate::server::handlers`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Malformed or missing request metadata (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// Transport or authorization-scheme violation (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials were provided but do not match (HTTP 401)
    #[error("{0}")]
    InvalidCredentials(String),

    /// Payload fails type validation, declared or sniffed (HTTP 415)
    #[error("{0}")]
    InvalidContent(String),

    /// Downstream I/O failure while writing the image (HTTP 500)
    #[error("{0}")]
    Internal(String),
}

impl PublishError {
    /// Create a `BadRequest` error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        PublishError::BadRequest(message.into())
    }

    /// Create an `Unauthorized` error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        PublishError::Unauthorized(message.into())
    }

    /// Create an `InvalidCredentials` error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        PublishError::InvalidCredentials(message.into())
    }

    /// Create an `InvalidContent` error.
    pub fn invalid_content(message: impl Into<String>) -> Self {
        PublishError::InvalidContent(message.into())
    }

    /// Create an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        PublishError::Internal(message.into())
    }
}
