//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Validate and normalize the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - The base URL must be an absolute http(s) URL; trailing slashes are removed.
//! - The timeout must be between 1 and `MAX_TIMEOUT_SECS` seconds.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_TIMEOUT_SECS, ENV_DOTENV_DISABLED, MAX_TIMEOUT_SECS};
use crate::types::{BackendConfig, Config};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    csrf_token: Option<SecretString>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax or
    /// cannot be read. Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the CSRF token sent with beacons.
    pub fn with_csrf_token(mut self, token: String) -> Self {
        self.csrf_token = Some(SecretString::new(token.into()));
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_csrf_token(&mut self, token: Option<SecretString>) {
        self.csrf_token = token;
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingBaseUrl`] if no base URL was provided.
    /// - [`ConfigError::InvalidBaseUrl`] if the URL does not parse or is not http(s).
    /// - [`ConfigError::InvalidTimeout`] if the timeout is zero or above `MAX_TIMEOUT_SECS`.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = validate_base_url(base_url)?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        Ok(Config {
            backend: BackendConfig {
                base_url,
                skip_verify: self.skip_verify.unwrap_or(false),
                timeout,
                csrf_token: self.csrf_token,
            },
        })
    }
}

/// Parse the base URL and strip trailing slashes.
fn validate_base_url(raw: String) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.clone(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                message: format!("unsupported scheme '{other}' (expected http or https)"),
            });
        }
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw,
            message: "must not contain a query or fragment".to_string(),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    if timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout {
            message: "must be greater than 0 seconds".to_string(),
        });
    }
    if timeout.as_secs() > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "must be at most {MAX_TIMEOUT_SECS} seconds (got {})",
                timeout.as_secs()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ENV_BASE_URL, ENV_CSRF_TOKEN, ENV_SKIP_VERIFY, ENV_TIMEOUT};
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    fn test_missing_base_url() {
        let err = ConfigLoader::new().build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_base_url_trailing_slashes_removed() {
        let config = ConfigLoader::new()
            .with_base_url("https://example.org//".to_string())
            .build()
            .unwrap();
        assert_eq!(config.backend.base_url, "https://example.org");
    }

    #[test]
    fn test_base_url_with_path_prefix_kept() {
        let config = ConfigLoader::new()
            .with_base_url("https://example.org/app/".to_string())
            .build()
            .unwrap();
        assert_eq!(config.backend.base_url, "https://example.org/app");
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let err = ConfigLoader::new()
            .with_base_url("ftp://example.org".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = ConfigLoader::new()
            .with_base_url("localhost:8181".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_query_rejected() {
        let err = ConfigLoader::new()
            .with_base_url("http://localhost:8181?x=1".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_timeout_bounds() {
        let zero = ConfigLoader::new()
            .with_base_url("http://localhost:8181".to_string())
            .with_timeout(Duration::ZERO)
            .build();
        assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));

        let too_long = ConfigLoader::new()
            .with_base_url("http://localhost:8181".to_string())
            .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
            .build();
        assert!(matches!(too_long, Err(ConfigError::InvalidTimeout { .. })));

        let max = ConfigLoader::new()
            .with_base_url("http://localhost:8181".to_string())
            .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS))
            .build()
            .unwrap();
        assert_eq!(max.backend.timeout, Duration::from_secs(MAX_TIMEOUT_SECS));
    }

    #[test]
    #[serial]
    fn test_env_populates_config() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("http://backend.test:8181/")),
                (ENV_CSRF_TOKEN, Some("csrf-abc")),
                (ENV_SKIP_VERIFY, Some("true")),
                (ENV_TIMEOUT, Some("12")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.backend.base_url, "http://backend.test:8181");
                assert!(config.backend.skip_verify);
                assert_eq!(config.backend.timeout, Duration::from_secs(12));
                assert_eq!(
                    config.backend.csrf_token.unwrap().expose_secret(),
                    "csrf-abc"
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_overrides_applied_after_env_win() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("http://from-env:8181")),
                (ENV_TIMEOUT, Some("12")),
                (ENV_CSRF_TOKEN, None),
                (ENV_SKIP_VERIFY, None),
            ],
            || {
                let config = ConfigLoader::new()
                    .from_env()
                    .unwrap()
                    .with_base_url("http://from-cli:8181".to_string())
                    .build()
                    .unwrap();
                assert_eq!(config.backend.base_url, "http://from-cli:8181");
                assert_eq!(config.backend.timeout, Duration::from_secs(12));
            },
        );
    }

    #[test]
    #[serial]
    fn test_blank_env_vars_use_defaults() {
        temp_env::with_vars(
            [
                (ENV_BASE_URL, Some("http://localhost:8181")),
                (ENV_CSRF_TOKEN, Some("  ")),
                (ENV_SKIP_VERIFY, Some("")),
                (ENV_TIMEOUT, Some(" ")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert!(config.backend.csrf_token.is_none());
                assert!(!config.backend.skip_verify);
                assert_eq!(
                    config.backend.timeout,
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_dotenv_disabled_is_noop() {
        temp_env::with_vars([(ENV_DOTENV_DISABLED, Some("1"))], || {
            assert!(ConfigLoader::dotenv_disabled());
            assert!(ConfigLoader::new().load_dotenv().is_ok());
        });
        temp_env::with_vars([(ENV_DOTENV_DISABLED, Some("no"))], || {
            assert!(!ConfigLoader::dotenv_disabled());
        });
    }
}
