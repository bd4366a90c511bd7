//! Request-level error types for static file serving.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while resolving a request path to a file under the served root.
///
/// Variants map to the HTTP status returned to callers. Anything that could
/// reveal filesystem structure outside the root — a traversal attempt, a
/// malformed path — answers 404, indistinguishable from a plain miss.
#[derive(Debug, Error)]
pub enum ServeError {
    /// No file or default document matches the request path.
    #[error("no file matches request path: {0}")]
    NotFound(String),

    /// The request path attempts to escape the served root.
    #[error("request path escapes the served root: {0}")]
    Traversal(String),

    /// The request path contains bytes that cannot name a file.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// The resolved file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServeError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServeError::NotFound(_) | ServeError::Traversal(_) | ServeError::InvalidPath(_) => {
                StatusCode::NOT_FOUND
            }
            // The file vanished between resolution and open.
            ServeError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ServeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
