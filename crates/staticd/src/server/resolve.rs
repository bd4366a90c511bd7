//! Request path to filesystem path resolution.
//!
//! Every request path is percent-decoded, normalised segment by segment, and
//! re-anchored under the served root. Parent-directory segments are rejected
//! before the filesystem is touched, and the resolved path is canonicalised
//! and checked for containment so a symlink inside the root cannot lead
//! outside it. Directories resolve to their `index.html` default document.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::error::ServeError;

/// Default document served when a request path denotes a directory.
pub const INDEX_FILE: &str = "index.html";

/// A file under the served root, ready to be streamed to a client.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    /// Canonical path of the file on disk.
    pub path: PathBuf,
    /// File size in bytes, used for `Content-Length`.
    pub size: u64,
    /// Content type inferred from the file extension.
    pub content_type: String,
}

/// Resolve a request path to a file under `root`.
///
/// # Errors
///
/// - [`ServeError::Traversal`] if the path contains a parent-directory
///   segment or canonicalises outside the root.
/// - [`ServeError::InvalidPath`] if the decoded path cannot name a file.
/// - [`ServeError::NotFound`] if no file or default document matches.
pub async fn resolve(root: &Path, request_path: &str) -> Result<ResolvedFile, ServeError> {
    let relative = normalize(request_path)?;

    let root = fs::canonicalize(root)
        .await
        .map_err(|_| ServeError::NotFound(request_path.to_owned()))?;
    let canonical = fs::canonicalize(root.join(&relative))
        .await
        .map_err(|_| ServeError::NotFound(request_path.to_owned()))?;

    // Canonicalisation resolves symlinks; a link pointing out of the root
    // must not be followed.
    if !canonical.starts_with(&root) {
        return Err(ServeError::Traversal(request_path.to_owned()));
    }

    let metadata = fs::metadata(&canonical).await?;
    let (path, metadata) = if metadata.is_dir() {
        let index = canonical.join(INDEX_FILE);
        let index_metadata = fs::metadata(&index)
            .await
            .map_err(|_| ServeError::NotFound(request_path.to_owned()))?;
        if !index_metadata.is_file() {
            return Err(ServeError::NotFound(request_path.to_owned()));
        }
        (index, index_metadata)
    } else if metadata.is_file() {
        (canonical, metadata)
    } else {
        return Err(ServeError::NotFound(request_path.to_owned()));
    };

    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Ok(ResolvedFile {
        path,
        size: metadata.len(),
        content_type,
    })
}

/// Normalise a request path into a relative path safe to join under the root.
///
/// Empty and `.` segments are dropped; `..` segments and byte sequences that
/// cannot name a file are rejected outright.
fn normalize(request_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::InvalidPath(request_path.to_owned()))?;

    if decoded.contains('\0') {
        return Err(ServeError::InvalidPath(request_path.to_owned()));
    }

    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ServeError::Traversal(request_path.to_owned())),
            _ if segment.contains('\\') => {
                return Err(ServeError::InvalidPath(request_path.to_owned()))
            }
            _ => relative.push(segment),
        }
    }
    Ok(relative)
}
