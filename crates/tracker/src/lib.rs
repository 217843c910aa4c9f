//! First-visit tutorial tracking for the exploration editor.
//!
//! This crate decides when the editor and translation tutorials should be
//! offered during a session, notifies UI components through named
//! [`NotificationChannel`]s, and reports tutorial starts to the backend via an
//! [`AnalyticsBeacon`]. All operations are synchronous and non-blocking; the
//! HTTP beacon runs on the ambient tokio runtime.

pub mod beacon;
pub mod collaborators;
pub mod notification;
pub mod state;
mod tracker;

pub use beacon::HttpAnalyticsBeacon;
pub use collaborators::{AnalyticsBeacon, EventRegistrar};
pub use notification::{NotificationChannel, SubscriptionId};
pub use state::TutorialState;
pub use tracker::TutorialFirstVisitTracker;
pub use tutorial_client::TutorialKind;
