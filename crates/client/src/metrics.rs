//! Metrics collection for analytics beacons.
//!
//! This module records, through the `metrics` facade:
//! - Request latency histograms
//! - Beacon outcome counters per tutorial kind
//! - Error counters by category
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder such as `metrics-exporter-prometheus`)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `kind`,
//!   `outcome`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use crate::models::TutorialKind;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "tutorial_api_request_duration_seconds";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "tutorial_api_errors_total";

/// Metric name for beacon outcome counter.
pub const METRIC_BEACONS_TOTAL: &str = "tutorial_beacons_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Non-success status outside 4xx/5xx
    Api,
    /// Request timeout
    Timeout,
    /// Request could not be built (bad URL component)
    InvalidRequest,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Api => "api",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::ConnectionRefused(_) => ErrorCategory::Transport,
            ClientError::InvalidUrl(_) => ErrorCategory::InvalidRequest,
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Api
                }
            }
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_request() {
                    ErrorCategory::Transport
                } else if e.is_timeout() {
                    ErrorCategory::Timeout
                } else {
                    ErrorCategory::Unknown
                }
            }
        }
    }
}

/// Final outcome of a fire-and-forget beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconOutcome {
    /// Backend acknowledged with a 2xx response.
    Delivered,
    /// Request failed; the failure was logged and dropped.
    Failed,
    /// Beacon could not be scheduled (no async runtime available).
    Dropped,
}

impl BeaconOutcome {
    /// Returns the string label for this outcome.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeaconOutcome::Delivered => "delivered",
            BeaconOutcome::Failed => "failed",
            BeaconOutcome::Dropped => "dropped",
        }
    }
}

/// Metrics collector for analytics calls.
///
/// A thin wrapper around the `metrics` crate macros that keeps label names
/// consistent.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of a request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record the final outcome of a beacon.
    pub fn record_beacon(&self, kind: TutorialKind, outcome: BeaconOutcome) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_BEACONS_TOTAL,
            "kind" => kind.as_str(),
            "outcome" => outcome.as_str(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::Http5xx.as_str(), "http_5xx");
        assert_eq!(ErrorCategory::Api.as_str(), "api");
        assert_eq!(ErrorCategory::Timeout.as_str(), "timeout");
        assert_eq!(ErrorCategory::InvalidRequest.as_str(), "invalid_request");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_error_categorization() {
        let timeout_err = ClientError::Timeout(Duration::from_secs(1));
        assert_eq!(ErrorCategory::from(&timeout_err), ErrorCategory::Timeout);

        let conn_err = ClientError::ConnectionRefused("localhost:8181".to_string());
        assert_eq!(ErrorCategory::from(&conn_err), ErrorCategory::Transport);

        let url_err = ClientError::InvalidUrl("..".to_string());
        assert_eq!(ErrorCategory::from(&url_err), ErrorCategory::InvalidRequest);

        let api_403 = ClientError::ApiError {
            status: 403,
            url: "test".to_string(),
            message: "forbidden".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_403), ErrorCategory::Http4xx);

        let api_502 = ClientError::ApiError {
            status: 502,
            url: "test".to_string(),
            message: "bad gateway".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_502), ErrorCategory::Http5xx);

        let api_302 = ClientError::ApiError {
            status: 302,
            url: "test".to_string(),
            message: "found".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_302), ErrorCategory::Api);
    }

    #[test]
    fn test_beacon_outcome_labels() {
        assert_eq!(BeaconOutcome::Delivered.as_str(), "delivered");
        assert_eq!(BeaconOutcome::Failed.as_str(), "failed");
        assert_eq!(BeaconOutcome::Dropped.as_str(), "dropped");
    }

    #[test]
    fn test_metrics_collector_enabled() {
        assert!(MetricsCollector::new().is_enabled());
        assert!(!MetricsCollector::disabled().is_enabled());
        assert!(!MetricsCollector::default().is_enabled());
    }
}
