//! Seams to the services the tracker drives but does not own.
//!
//! Both collaborators are fire-and-forget: the tracker never looks at a
//! result, and implementations must not block the caller on I/O.

use tutorial_client::TutorialKind;

/// Records first-entry analytics events for the editor session.
#[cfg_attr(test, mockall::automock)]
pub trait EventRegistrar: Send + Sync {
    /// Start registering editor events for an experience.
    fn init_register_events(&self, experience_id: &str);

    /// Record that the user entered the editor for the first time.
    fn register_editor_first_entry_event(&self);
}

/// Sends the "tutorial started" analytics beacon.
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsBeacon: Send + Sync {
    /// Report that `kind` tutorial was started in `experience_id`.
    ///
    /// Must return immediately; delivery failures are the implementation's to log.
    fn tutorial_started(&self, kind: TutorialKind, experience_id: &str);
}
