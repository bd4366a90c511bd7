//! Shared application state injected into the asset handler.

use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// The served root is read-only for the process lifetime, so the state is a
/// cheaply cloneable handle with no interior locking.
#[derive(Clone)]
pub struct AppState {
    /// Root directory all request paths resolve beneath.
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Create a new [`AppState`] serving the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }
}
