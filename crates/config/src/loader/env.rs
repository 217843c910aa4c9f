//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `TUTORIAL_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{ENV_BASE_URL, ENV_CSRF_TOKEN, ENV_SKIP_VERIFY, ENV_TIMEOUT};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none(ENV_CSRF_TOKEN) {
        loader.set_csrf_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY) {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: ENV_SKIP_VERIFY.to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }

    Ok(())
}
