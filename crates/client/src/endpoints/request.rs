//! Single-shot request helper.
//!
//! Sends a request exactly once, records latency and outcome metrics, and
//! turns non-success responses into [`ClientError::ApiError`]. Beacons are
//! best-effort, so there is no retry loop here.

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Maximum number of body bytes kept in an error message.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Send a request once and map the outcome to a [`Result`].
///
/// # Arguments
///
/// * `builder` - The prepared request
/// * `url` - Full request URL, used for error context
/// * `endpoint` - Endpoint path template used as the metrics label
/// * `timeout` - Configured request timeout, reported on timeouts
/// * `metrics` - Optional metrics collector
///
/// # Errors
///
/// - [`ClientError::Timeout`] / [`ClientError::ConnectionRefused`] /
///   [`ClientError::HttpError`] on transport failures.
/// - [`ClientError::ApiError`] on any non-2xx status.
pub async fn send_request(
    builder: RequestBuilder,
    url: &str,
    endpoint: &str,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let started = Instant::now();

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from_transport(e, url, timeout);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, "POST", started.elapsed(), None);
                m.record_client_error(endpoint, "POST", &err);
            }
            return Err(err);
        }
    };

    let status = response.status();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, "POST", started.elapsed(), Some(status.as_u16()));
    }

    if status.is_success() {
        debug!(url, status = status.as_u16(), "Request succeeded");
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    } else {
        truncate(body, MAX_ERROR_BODY_LEN)
    };

    let err = ClientError::ApiError {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    };
    if let Some(m) = metrics {
        m.record_client_error(endpoint, "POST", &err);
    }
    Err(err)
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() <= max {
        return body;
    }
    let mut cut = max;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    body.truncate(cut);
    body.push_str("...");
    body
}
