//! Simulated editor session driving a [`TutorialFirstVisitTracker`].
//!
//! Responsibilities:
//! - Wire the tracker to the HTTP beacon and a logging event registrar.
//! - Print each notification as it fires.
//! - Flush outstanding beacons before reporting the final state.
//!
//! Does NOT handle:
//! - Argument parsing or logging setup (see `main`).

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tutorial_client::AnalyticsClient;
use tutorial_tracker::{
    EventRegistrar, HttpAnalyticsBeacon, NotificationChannel, TutorialFirstVisitTracker,
    TutorialState,
};

/// Event registrar that only logs what the editor would register.
#[derive(Debug, Default)]
pub struct LoggingEventRegistrar;

impl EventRegistrar for LoggingEventRegistrar {
    fn init_register_events(&self, experience_id: &str) {
        info!(experience_id, "Registering editor events");
    }

    fn register_editor_first_entry_event(&self) {
        info!("Registering editor first entry event");
    }
}

/// What the session should simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Editor { first_time: bool },
    Translation { not_seen_before: bool },
}

pub struct Session {
    tracker: TutorialFirstVisitTracker,
    beacon: HttpAnalyticsBeacon,
    flush_timeout: Duration,
}

impl Session {
    pub fn new(client: AnalyticsClient, flush_timeout: Duration) -> Self {
        let beacon = HttpAnalyticsBeacon::new(client);
        let tracker = TutorialFirstVisitTracker::new(
            Arc::new(beacon.clone()),
            Arc::new(LoggingEventRegistrar),
        );
        for channel in [
            tracker.on_enter_editor_for_the_first_time(),
            tracker.on_enter_translation_for_the_first_time(),
            tracker.on_open_editor_tutorial(),
            tracker.on_open_post_tutorial_help_popover(),
            tracker.on_open_translation_tutorial(),
        ] {
            print_on_emit(channel);
        }

        Self {
            tracker,
            beacon,
            flush_timeout,
        }
    }

    /// Run one tutorial flow to completion and return the final state.
    pub async fn run(mut self, flow: Flow, experience_id: &str) -> TutorialState {
        match flow {
            Flow::Editor { first_time } => {
                self.tracker.init_editor(first_time, experience_id);
                self.tracker.mark_editor_tutorial_finished();
            }
            Flow::Translation { not_seen_before } => {
                if not_seen_before {
                    self.tracker.mark_translation_tutorial_not_seen_before();
                }
                self.tracker.init_translation(experience_id);
                self.tracker.mark_translation_tutorial_finished();
            }
        }

        self.beacon.flush_with_timeout(self.flush_timeout).await;
        self.tracker.state()
    }
}

fn print_on_emit(channel: &NotificationChannel) {
    let name = channel.name();
    channel.subscribe(move || println!("notification: {name}"));
}
