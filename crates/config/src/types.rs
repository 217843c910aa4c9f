//! Configuration types for the tutorial tracker.
//!
//! Responsibilities:
//! - Define backend connection settings (URL, TLS verification, timeout, CSRF token).
//! - Define the top-level `Config` structure.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Duration fields are serialized as seconds (integers).
//! - The CSRF token is never serialized.

use crate::constants::{DEFAULT_DEV_BASE_URL, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Settings for the backend that receives tutorial analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., http://localhost:8181), without trailing slash
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    #[serde(default)]
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Token sent in the `X-CSRFToken` header, if the backend enforces it
    #[serde(skip)]
    pub csrf_token: Option<SecretString>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEV_BASE_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            csrf_token: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    pub backend: BackendConfig,
}

impl Config {
    /// Create a config pointing at `base_url` with default settings otherwise.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                base_url: base_url.into(),
                ..BackendConfig::default()
            },
        }
    }
}
