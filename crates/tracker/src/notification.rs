//! Payload-less broadcast notification channels.
//!
//! Responsibilities:
//! - Keep an ordered list of listeners for one named notification.
//! - Deliver each emission synchronously to every listener registered at that moment.
//!
//! Does NOT handle:
//! - Buffering or replay: a listener added after an emission never sees it.
//! - Payloads: notifications carry no data.
//!
//! Invariants:
//! - Emission is only possible from inside this crate; consumers can only subscribe.
//! - Listeners are invoked in subscription order, each at most once per emission.
//! - The listener list is snapshotted before delivery, so a listener may subscribe
//!   or unsubscribe without deadlocking; such changes apply from the next emission.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`NotificationChannel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

/// A named, emit-only notification source.
pub struct NotificationChannel {
    name: &'static str,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl NotificationChannel {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Name of the notification, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a listener invoked on every future emission.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() < before
    }

    /// Number of currently registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Notify every current listener. Returns how many were notified.
    pub(crate) fn emit(&self) -> usize {
        let snapshot: Vec<Listener> = self
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(
            notification = self.name,
            listeners = snapshot.len(),
            "Emitting notification"
        );

        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    // A listener panicking cannot poison this lock: listeners run after the guard is dropped.
    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
