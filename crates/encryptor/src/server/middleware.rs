//! Axum middleware layers applied to the router.
//!
//! Includes timeout enforcement, response compression, and (in development
//! mode) per-request trace logging.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
