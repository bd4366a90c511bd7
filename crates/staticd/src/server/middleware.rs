//! Axum middleware layers applied to the router.
//!
//! Includes request tracing and timeout enforcement. The timeout is a
//! hardening addition: slow or stalled clients release their task after this
//! duration instead of holding it open indefinitely.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
