//! Analytics client and API methods.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Fire-and-forget scheduling (callers decide whether to await)

pub mod builder;

use std::time::Duration;

use secrecy::SecretString;

use crate::endpoints;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::TutorialKind;

/// Client for the tutorial analytics handlers.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
///
/// ```rust,ignore
/// use tutorial_client::{AnalyticsClient, TutorialKind};
///
/// let client = AnalyticsClient::builder()
///     .base_url("http://localhost:8181".to_string())
///     .build()?;
/// client.record_tutorial_started(TutorialKind::Editor, "exp1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) csrf_token: Option<SecretString>,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl AnalyticsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::AnalyticsClientBuilder {
        builder::AnalyticsClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the metrics collector, if any.
    pub fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }

    /// Record that `kind` tutorial was started in `experience_id`.
    pub async fn record_tutorial_started(
        &self,
        kind: TutorialKind,
        experience_id: &str,
    ) -> Result<()> {
        endpoints::record_tutorial_started(
            &self.http,
            &self.base_url,
            kind,
            experience_id,
            self.csrf_token.as_ref(),
            self.timeout,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Record that the editor tutorial was started.
    pub async fn record_editor_tutorial_started(&self, experience_id: &str) -> Result<()> {
        self.record_tutorial_started(TutorialKind::Editor, experience_id)
            .await
    }

    /// Record that the translation tutorial was started.
    pub async fn record_translation_tutorial_started(&self, experience_id: &str) -> Result<()> {
        self.record_tutorial_started(TutorialKind::Translation, experience_id)
            .await
    }
}
