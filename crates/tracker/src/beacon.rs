//! HTTP implementation of [`AnalyticsBeacon`].
//!
//! Responsibilities:
//! - Spawn one task per beacon on the ambient tokio runtime and return at once.
//! - Log and count failures; never surface them to the caller.
//! - Track in-flight beacons so an application can flush them before exit.
//!
//! Does NOT handle:
//! - Retries or backoff: a failed beacon is logged once and dropped.
//! - Cancellation: once spawned, a beacon runs to completion or timeout.
//!
//! Invariants:
//! - `tutorial_started` never blocks and never panics, with or without a runtime.
//! - Without a runtime the beacon is dropped with a warning.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};
use tutorial_client::{AnalyticsClient, BeaconOutcome, TutorialKind};

use crate::collaborators::AnalyticsBeacon;

/// Fire-and-forget beacon backed by [`AnalyticsClient`].
///
/// Clones share the same client and the same set of in-flight tasks.
#[derive(Debug, Clone)]
pub struct HttpAnalyticsBeacon {
    client: AnalyticsClient,
    tasks: TaskTracker,
}

impl HttpAnalyticsBeacon {
    /// Wrap a client.
    pub fn new(client: AnalyticsClient) -> Self {
        Self {
            client,
            tasks: TaskTracker::new(),
        }
    }

    /// Number of beacons spawned but not yet settled.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every beacon spawned so far has settled.
    ///
    /// Intended for shutdown paths; tracker operations never call this.
    pub async fn flush(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Like [`flush`](Self::flush), giving up after `timeout`.
    ///
    /// Returns `true` if everything settled in time.
    pub async fn flush_with_timeout(&self, timeout: Duration) -> bool {
        let settled = tokio::time::timeout(timeout, self.flush()).await.is_ok();
        if !settled {
            // flush() was cancelled mid-wait, so the tracker may still be closed.
            self.tasks.reopen();
            warn!(
                pending = self.in_flight(),
                "Timed out waiting for tutorial analytics beacons"
            );
        }
        settled
    }

    fn record(&self, kind: TutorialKind, outcome: BeaconOutcome) {
        if let Some(metrics) = self.client.metrics() {
            metrics.record_beacon(kind, outcome);
        }
    }
}

impl AnalyticsBeacon for HttpAnalyticsBeacon {
    fn tutorial_started(&self, kind: TutorialKind, experience_id: &str) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    %kind,
                    experience_id = %experience_id,
                    "No async runtime available; dropping tutorial start event"
                );
                self.record(kind, BeaconOutcome::Dropped);
                return;
            }
        };

        let beacon = self.clone();
        let experience_id = experience_id.to_string();
        self.tasks.spawn_on(
            async move {
                match beacon
                    .client
                    .record_tutorial_started(kind, &experience_id)
                    .await
                {
                    Ok(()) => {
                        debug!(%kind, experience_id = %experience_id, "Recorded tutorial start event");
                        beacon.record(kind, BeaconOutcome::Delivered);
                    }
                    Err(e) => {
                        warn!(
                            %kind,
                            experience_id = %experience_id,
                            error = %e,
                            "Could not record tutorial start event"
                        );
                        beacon.record(kind, BeaconOutcome::Failed);
                    }
                }
            },
            &handle,
        );
    }
}
