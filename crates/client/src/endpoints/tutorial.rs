//! Tutorial analytics endpoint implementations.
//!
//! # What this module handles:
//! - `POST /createhandler/started_tutorial_event/{experience_id}`
//! - `POST /createhandler/started_translation_tutorial_event/{experience_id}`
//!
//! # What this module does NOT handle:
//! - Deciding whether a beacon should be sent (see the tracker crate)
//! - Retrying failed beacons
//!
//! # Invariants
//! - Requests carry no body; any 2xx response counts as success and its body is ignored
//! - The experience id is always encoded as exactly one path segment

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::endpoints::send_request;
use crate::endpoints::url_encoding::{encode_path_segment, is_dot_segment};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::TutorialKind;

/// Path of the handler recording the start of the editor tutorial.
pub const STARTED_TUTORIAL_EVENT_PATH: &str = "/createhandler/started_tutorial_event";

/// Path of the handler recording the start of the translation tutorial.
pub const STARTED_TRANSLATION_TUTORIAL_EVENT_PATH: &str =
    "/createhandler/started_translation_tutorial_event";

/// Header carrying the CSRF token.
pub const CSRF_TOKEN_HEADER: &str = "X-CSRFToken";

/// Handler path for a tutorial kind, without the experience id.
pub const fn event_path(kind: TutorialKind) -> &'static str {
    match kind {
        TutorialKind::Editor => STARTED_TUTORIAL_EVENT_PATH,
        TutorialKind::Translation => STARTED_TRANSLATION_TUTORIAL_EVENT_PATH,
    }
}

/// Record that a tutorial was started for an experience.
///
/// # Arguments
/// * `client` - The HTTP client
/// * `base_url` - Backend base URL without trailing slash
/// * `kind` - Which tutorial was started
/// * `experience_id` - Experience the tutorial was started in
/// * `csrf_token` - Optional CSRF token sent as `X-CSRFToken`
/// * `timeout` - Configured request timeout, for error reporting
/// * `metrics` - Optional metrics collector
///
/// # Errors
/// Returns [`ClientError::InvalidUrl`] for an empty or dot-segment experience id,
/// otherwise whatever [`send_request`] reports.
pub async fn record_tutorial_started(
    client: &Client,
    base_url: &str,
    kind: TutorialKind,
    experience_id: &str,
    csrf_token: Option<&SecretString>,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    if experience_id.is_empty() || is_dot_segment(experience_id) {
        return Err(ClientError::InvalidUrl(format!(
            "experience id '{experience_id}' cannot be used as a path segment"
        )));
    }

    let endpoint = event_path(kind);
    let url = format!(
        "{}{}/{}",
        base_url,
        endpoint,
        encode_path_segment(experience_id)
    );

    let mut builder = client.post(&url);
    if let Some(token) = csrf_token {
        builder = builder.header(CSRF_TOKEN_HEADER, token.expose_secret());
    }

    send_request(builder, &url, endpoint, timeout, metrics).await?;
    Ok(())
}
