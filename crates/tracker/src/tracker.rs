//! First-visit tracking for the editor and translation tutorials.
//!
//! Responsibilities:
//! - Hold the session's [`TutorialState`] and apply the `init_*` / `mark_*` transitions.
//! - Emit lifecycle notifications to subscribed UI components.
//! - Drive the event registrar and the analytics beacon on first entry.
//!
//! Does NOT handle:
//! - Rendering tutorials or popovers (subscribers do that).
//! - Delivering beacons (see [`crate::beacon`]); operations here never wait on I/O.
//!
//! Invariants:
//! - First-visit flags only go `true -> false`.
//! - The enter notification, registrar call and beacon of a flow fire at most once per session.
//! - No operation can fail or panic on behalf of a collaborator's I/O.

use std::sync::Arc;

use tracing::debug;
use tutorial_client::TutorialKind;

use crate::collaborators::{AnalyticsBeacon, EventRegistrar};
use crate::notification::NotificationChannel;
use crate::state::TutorialState;

/// Session-scoped tracker for the "first time in the editor / translation tab" tutorials.
///
/// Create one per session and hand references to the components that need it.
///
/// ```rust,ignore
/// let mut tracker = TutorialFirstVisitTracker::new(beacon, registrar);
/// tracker.on_enter_editor_for_the_first_time().subscribe(|| show_welcome_modal());
/// tracker.init_editor(true, "exp1");
/// ```
pub struct TutorialFirstVisitTracker {
    state: TutorialState,
    // Set when a flow's first-entry side effects have run; absorbs repeated init calls
    // while the first-visit flag still reads true.
    editor_entry_announced: bool,
    translation_entry_announced: bool,
    beacon: Arc<dyn AnalyticsBeacon>,
    registrar: Arc<dyn EventRegistrar>,
    enter_editor_for_the_first_time: NotificationChannel,
    enter_translation_for_the_first_time: NotificationChannel,
    open_editor_tutorial: NotificationChannel,
    open_post_tutorial_help_popover: NotificationChannel,
    open_translation_tutorial: NotificationChannel,
}

impl TutorialFirstVisitTracker {
    /// Create a tracker with fresh session state.
    pub fn new(beacon: Arc<dyn AnalyticsBeacon>, registrar: Arc<dyn EventRegistrar>) -> Self {
        Self {
            state: TutorialState::default(),
            editor_entry_announced: false,
            translation_entry_announced: false,
            beacon,
            registrar,
            enter_editor_for_the_first_time: NotificationChannel::new(
                "enter_editor_for_the_first_time",
            ),
            enter_translation_for_the_first_time: NotificationChannel::new(
                "enter_translation_for_the_first_time",
            ),
            open_editor_tutorial: NotificationChannel::new("open_editor_tutorial"),
            open_post_tutorial_help_popover: NotificationChannel::new(
                "open_post_tutorial_help_popover",
            ),
            open_translation_tutorial: NotificationChannel::new("open_translation_tutorial"),
        }
    }

    /// Snapshot of the current flags.
    pub fn state(&self) -> TutorialState {
        self.state
    }

    /// Called when the editor loads.
    ///
    /// `first_time` says whether the backend considers this the user's first
    /// visit to the editor. Only a first visit with the flag still set triggers
    /// the tutorial; any other combination clears the flag.
    pub fn init_editor(&mut self, first_time: bool, experience_id: &str) {
        if !first_time || !self.state.in_editor_first_visit {
            self.state.in_editor_first_visit = false;
            debug!(first_time, experience_id, "Editor tutorial not triggered");
            return;
        }
        if self.editor_entry_announced {
            debug!(experience_id, "Editor first entry already announced");
            return;
        }

        self.editor_entry_announced = true;
        debug!(experience_id, "Entering editor for the first time");
        self.enter_editor_for_the_first_time.emit();
        self.registrar.init_register_events(experience_id);
        self.beacon
            .tutorial_started(TutorialKind::Editor, experience_id);
    }

    /// Called when the editor tutorial is finished or skipped.
    pub fn mark_editor_tutorial_finished(&mut self) {
        if self.state.in_editor_first_visit {
            self.open_post_tutorial_help_popover.emit();
            self.registrar.register_editor_first_entry_event();
        }
        self.state.in_editor_first_visit = false;
        debug!("Editor tutorial finished");
    }

    /// Allow the translation tutorial to trigger on the next [`init_translation`](Self::init_translation).
    pub fn mark_translation_tutorial_not_seen_before(&mut self) {
        self.state.translation_not_seen_before = true;
    }

    /// Called when the translation tab loads.
    pub fn init_translation(&mut self, experience_id: &str) {
        if !self.state.translation_not_seen_before || !self.state.in_translation_first_visit {
            self.state.in_translation_first_visit = false;
            debug!(experience_id, "Translation tutorial not triggered");
            return;
        }
        if self.translation_entry_announced {
            debug!(experience_id, "Translation first entry already announced");
            return;
        }

        self.translation_entry_announced = true;
        debug!(experience_id, "Entering translation tab for the first time");
        self.enter_translation_for_the_first_time.emit();
        self.registrar.init_register_events(experience_id);
        self.beacon
            .tutorial_started(TutorialKind::Translation, experience_id);
    }

    /// Called when the translation tutorial is finished or skipped.
    pub fn mark_translation_tutorial_finished(&mut self) {
        if self.state.in_translation_first_visit {
            self.open_post_tutorial_help_popover.emit();
            self.registrar.register_editor_first_entry_event();
        }
        self.state.in_translation_first_visit = false;
        debug!("Translation tutorial finished");
    }

    /// Ask the UI to open the editor tutorial, e.g. from a help menu.
    pub fn open_editor_tutorial(&self) {
        self.open_editor_tutorial.emit();
    }

    /// Ask the UI to open the translation tutorial.
    pub fn open_translation_tutorial(&self) {
        self.open_translation_tutorial.emit();
    }

    pub fn on_enter_editor_for_the_first_time(&self) -> &NotificationChannel {
        &self.enter_editor_for_the_first_time
    }

    pub fn on_enter_translation_for_the_first_time(&self) -> &NotificationChannel {
        &self.enter_translation_for_the_first_time
    }

    pub fn on_open_editor_tutorial(&self) -> &NotificationChannel {
        &self.open_editor_tutorial
    }

    pub fn on_open_post_tutorial_help_popover(&self) -> &NotificationChannel {
        &self.open_post_tutorial_help_popover
    }

    pub fn on_open_translation_tutorial(&self) -> &NotificationChannel {
        &self.open_translation_tutorial
    }
}

impl std::fmt::Debug for TutorialFirstVisitTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorialFirstVisitTracker")
            .field("state", &self.state)
            .field("editor_entry_announced", &self.editor_entry_announced)
            .field("translation_entry_announced", &self.translation_entry_announced)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockAnalyticsBeacon, MockEventRegistrar};
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn count(channel: &NotificationChannel) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        channel.subscribe(move || {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    fn tracker(
        beacon: MockAnalyticsBeacon,
        registrar: MockEventRegistrar,
    ) -> TutorialFirstVisitTracker {
        TutorialFirstVisitTracker::new(Arc::new(beacon), Arc::new(registrar))
    }

    fn quiet() -> TutorialFirstVisitTracker {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon.expect_tutorial_started().never();
        let mut registrar = MockEventRegistrar::new();
        registrar.expect_init_register_events().never();
        registrar.expect_register_editor_first_entry_event().never();
        tracker(beacon, registrar)
    }

    #[test]
    fn test_init_editor_first_time_triggers_once() {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon
            .expect_tutorial_started()
            .withf(|kind, id| *kind == TutorialKind::Editor && id == "exp1")
            .times(1)
            .return_const(());
        let mut registrar = MockEventRegistrar::new();
        registrar
            .expect_init_register_events()
            .with(eq("exp1"))
            .times(1)
            .return_const(());

        let mut tracker = tracker(beacon, registrar);
        let entered = count(tracker.on_enter_editor_for_the_first_time());

        tracker.init_editor(true, "exp1");

        assert_eq!(entered.load(Ordering::SeqCst), 1);
        // The flag is only cleared by finishing or a non-triggering init.
        assert!(tracker.state().in_editor_first_visit);
    }

    #[test]
    fn test_init_editor_twice_emits_once() {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon.expect_tutorial_started().times(1).return_const(());
        let mut registrar = MockEventRegistrar::new();
        registrar
            .expect_init_register_events()
            .times(1)
            .return_const(());

        let mut tracker = tracker(beacon, registrar);
        let entered = count(tracker.on_enter_editor_for_the_first_time());

        tracker.init_editor(true, "exp1");
        tracker.init_editor(true, "exp1");

        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_init_editor_not_first_time_is_silent_and_clears_flag() {
        let mut tracker = quiet();
        let entered = count(tracker.on_enter_editor_for_the_first_time());

        tracker.init_editor(false, "exp1");

        assert_eq!(entered.load(Ordering::SeqCst), 0);
        assert!(!tracker.state().in_editor_first_visit);
    }

    #[test]
    fn test_init_editor_after_finish_is_silent() {
        let mut registrar = MockEventRegistrar::new();
        registrar.expect_init_register_events().never();
        registrar
            .expect_register_editor_first_entry_event()
            .times(1)
            .return_const(());
        let mut beacon = MockAnalyticsBeacon::new();
        beacon.expect_tutorial_started().never();

        let mut tracker = tracker(beacon, registrar);
        let entered = count(tracker.on_enter_editor_for_the_first_time());

        tracker.mark_editor_tutorial_finished();
        tracker.init_editor(true, "exp1");

        assert_eq!(entered.load(Ordering::SeqCst), 0);
        assert!(!tracker.state().in_editor_first_visit);
    }

    #[test]
    fn test_mark_editor_finished_opens_help_popover_once() {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon.expect_tutorial_started().return_const(());
        let mut registrar = MockEventRegistrar::new();
        registrar.expect_init_register_events().return_const(());
        registrar
            .expect_register_editor_first_entry_event()
            .times(1)
            .return_const(());

        let mut tracker = tracker(beacon, registrar);
        let popover = count(tracker.on_open_post_tutorial_help_popover());

        tracker.init_editor(true, "exp1");
        tracker.mark_editor_tutorial_finished();
        tracker.mark_editor_tutorial_finished();

        assert_eq!(popover.load(Ordering::SeqCst), 1);
        assert!(!tracker.state().in_editor_first_visit);
    }

    #[test]
    fn test_mark_editor_finished_when_flag_already_false_is_silent() {
        let mut tracker = quiet();
        let popover = count(tracker.on_open_post_tutorial_help_popover());

        tracker.init_editor(false, "exp1");
        tracker.mark_editor_tutorial_finished();

        assert_eq!(popover.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_init_translation_requires_not_seen_before() {
        let mut tracker = quiet();
        let entered = count(tracker.on_enter_translation_for_the_first_time());

        tracker.init_translation("exp1");

        assert_eq!(entered.load(Ordering::SeqCst), 0);
        assert!(!tracker.state().in_translation_first_visit);
    }

    #[test]
    fn test_init_translation_after_not_seen_before_triggers_once() {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon
            .expect_tutorial_started()
            .withf(|kind, id| *kind == TutorialKind::Translation && id == "exp9")
            .times(1)
            .return_const(());
        let mut registrar = MockEventRegistrar::new();
        registrar
            .expect_init_register_events()
            .with(eq("exp9"))
            .times(1)
            .return_const(());

        let mut tracker = tracker(beacon, registrar);
        let entered = count(tracker.on_enter_translation_for_the_first_time());
        let editor_entered = count(tracker.on_enter_editor_for_the_first_time());

        tracker.mark_translation_tutorial_not_seen_before();
        tracker.init_translation("exp9");
        tracker.init_translation("exp9");

        assert_eq!(entered.load(Ordering::SeqCst), 1);
        assert_eq!(editor_entered.load(Ordering::SeqCst), 0);
        assert!(tracker.state().in_translation_first_visit);
        assert!(tracker.state().translation_not_seen_before);
    }

    #[test]
    fn test_not_seen_before_after_skipped_init_does_not_revive_flag() {
        let mut tracker = quiet();

        tracker.init_translation("exp1");
        tracker.mark_translation_tutorial_not_seen_before();
        tracker.init_translation("exp1");

        assert!(!tracker.state().in_translation_first_visit);
    }

    #[test]
    fn test_mark_translation_finished_uses_shared_popover_channel() {
        let mut beacon = MockAnalyticsBeacon::new();
        beacon.expect_tutorial_started().return_const(());
        let mut registrar = MockEventRegistrar::new();
        registrar.expect_init_register_events().return_const(());
        registrar
            .expect_register_editor_first_entry_event()
            .times(1)
            .return_const(());

        let mut tracker = tracker(beacon, registrar);
        let popover = count(tracker.on_open_post_tutorial_help_popover());

        tracker.mark_translation_tutorial_not_seen_before();
        tracker.init_translation("exp1");
        tracker.mark_translation_tutorial_finished();
        tracker.mark_translation_tutorial_finished();

        assert_eq!(popover.load(Ordering::SeqCst), 1);
        assert!(!tracker.state().in_translation_first_visit);
        // Editor flow is independent.
        assert!(tracker.state().in_editor_first_visit);
    }

    #[test]
    fn test_open_tutorial_requests_reach_their_channels_only() {
        let tracker = quiet();
        let editor = count(tracker.on_open_editor_tutorial());
        let translation = count(tracker.on_open_translation_tutorial());
        let popover = count(tracker.on_open_post_tutorial_help_popover());

        tracker.open_editor_tutorial();
        tracker.open_editor_tutorial();
        tracker.open_translation_tutorial();

        assert_eq!(editor.load(Ordering::SeqCst), 2);
        assert_eq!(translation.load(Ordering::SeqCst), 1);
        assert_eq!(popover.load(Ordering::SeqCst), 0);
        assert_eq!(tracker.state(), TutorialState::default());
    }

    #[test]
    fn test_channel_names() {
        let tracker = quiet();
        assert_eq!(
            tracker.on_enter_editor_for_the_first_time().name(),
            "enter_editor_for_the_first_time"
        );
        assert_eq!(
            tracker.on_open_post_tutorial_help_popover().name(),
            "open_post_tutorial_help_popover"
        );
    }
}
