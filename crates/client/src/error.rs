//! Error types for the analytics client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the analytics backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error not covered by a more specific variant.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the backend.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused or otherwise could not be established.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Invalid URL or URL component.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classify a transport error from reqwest into the most specific variant.
    pub(crate) fn from_transport(error: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else if error.is_connect() {
            Self::ConnectionRefused(url.to_string())
        } else {
            Self::HttpError(error)
        }
    }

    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
