//! Client builder for constructing [`AnalyticsClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # Invariants
//! - `base_url` is required and must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use secrecy::SecretString;
use tutorial_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
};

use crate::client::AnalyticsClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`AnalyticsClient`].
///
/// ```rust,ignore
/// let client = AnalyticsClient::builder()
///     .base_url("http://localhost:8181".to_string())
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct AnalyticsClientBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    csrf_token: Option<SecretString>,
    metrics: Option<MetricsCollector>,
}

impl Default for AnalyticsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            csrf_token: None,
            metrics: None,
        }
    }
}

impl AnalyticsClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the backend, e.g. `http://localhost:8181`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// Only use this in development environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the CSRF token sent as `X-CSRFToken`.
    pub fn csrf_token(mut self, token: SecretString) -> Self {
        self.csrf_token = Some(token);
        self
    }

    /// Set the metrics collector.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-configure the builder from a loaded [`Config`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.backend.base_url.clone());
        self.skip_verify = config.backend.skip_verify;
        self.timeout = config.backend.timeout;
        self.csrf_token = config.backend.csrf_token.clone();
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`AnalyticsClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or is empty.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<AnalyticsClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl(
                "base_url must not be empty".to_string(),
            ));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(AnalyticsClient {
            http,
            base_url,
            timeout: self.timeout,
            csrf_token: self.csrf_token,
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::with_base_url("https://backend.example.org");
        config.backend.skip_verify = true;
        config.backend.timeout = Duration::from_secs(7);
        config.backend.csrf_token = Some(SecretString::new("csrf".to_string().into()));

        let builder = AnalyticsClient::builder().from_config(&config);

        assert_eq!(
            builder.base_url,
            Some("https://backend.example.org".to_string())
        );
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(7));
        assert_eq!(builder.csrf_token.as_ref().unwrap().expose_secret(), "csrf");
    }

    #[test]
    fn test_from_config_builds() {
        let config = Config::with_base_url("http://localhost:8181");
        let client = AnalyticsClient::builder()
            .from_config(&config)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8181");
    }

    #[test]
    fn test_normalize_base_url_multiple_trailing_slashes() {
        assert_eq!(
            AnalyticsClientBuilder::normalize_base_url("http://example.com:8181//".to_string()),
            "http://example.com:8181"
        );
    }

    #[test]
    fn test_only_slashes_rejected() {
        let result = AnalyticsClient::builder().base_url("///".to_string()).build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
