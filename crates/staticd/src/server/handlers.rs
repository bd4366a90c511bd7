//! Axum request handler for static asset retrieval.

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use super::resolve;
use super::state::AppState;
use crate::error::ServeError;

/// Fallback handler: map the request path to a file under the served root and
/// stream its bytes back.
///
/// Only `GET` and `HEAD` are retrieval requests; anything else answers 404,
/// the same as a path with no file behind it. `HEAD` answers with the same
/// headers a `GET` would carry, without opening the file.
pub async fn asset(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return error_response(
            ServeError::NotFound(uri.path().to_owned()),
            uri.path(),
        );
    }

    let resolved = match resolve::resolve(&state.root, uri.path()).await {
        Ok(file) => file,
        Err(err) => return error_response(err, uri.path()),
    };

    let headers = [
        (header::CONTENT_TYPE, resolved.content_type.clone()),
        (header::CONTENT_LENGTH, resolved.size.to_string()),
    ];

    if method == Method::HEAD {
        return (StatusCode::OK, headers).into_response();
    }

    let file = match File::open(&resolved.path).await {
        Ok(file) => file,
        Err(err) => return error_response(ServeError::Io(err), uri.path()),
    };

    let body = Body::from_stream(ReaderStream::new(file));
    (StatusCode::OK, headers, body).into_response()
}

/// Convert a [`ServeError`] into a plain-text response, logging server-side
/// failures at warn level and rejections at debug level.
fn error_response(err: ServeError, request_path: &str) -> Response {
    let status = err.http_status();
    if status.is_server_error() {
        warn!(path = request_path, error = %err, "failed to serve file");
    } else {
        debug!(path = request_path, error = %err, "request rejected");
    }

    let message = if status == StatusCode::NOT_FOUND {
        "Not Found"
    } else {
        "Internal Server Error"
    };
    (status, message).into_response()
}
