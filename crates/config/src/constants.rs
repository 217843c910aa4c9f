//! Centralized constants for the tutorial tracker workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Base URL of a local development backend.
pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8181";

// =============================================================================
// Environment Variables
// =============================================================================

/// Backend base URL.
pub const ENV_BASE_URL: &str = "TUTORIAL_BASE_URL";

/// Request timeout in whole seconds.
pub const ENV_TIMEOUT: &str = "TUTORIAL_TIMEOUT";

/// CSRF token sent with analytics beacons.
pub const ENV_CSRF_TOKEN: &str = "TUTORIAL_CSRF_TOKEN";

/// Skip TLS certificate verification (`true`/`false`).
pub const ENV_SKIP_VERIFY: &str = "TUTORIAL_SKIP_VERIFY";

/// Set to `1` or `true` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
