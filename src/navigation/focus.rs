//! The visible-root pointer.
//!
//! Shared by the navigator and every root. Roots take this lock before their
//! own state lock, so a tab switch and the push that follows it are one step
//! for any other dispatch.

use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;

use crate::navigation::navigator::NavigationEvent;
use crate::navigation::root::RootId;
use crate::observability::metrics;

#[derive(Debug)]
pub struct Focus {
    active: Mutex<RootId>,
    events: broadcast::Sender<NavigationEvent>,
}

impl Focus {
    pub fn new(active: RootId, events: broadcast::Sender<NavigationEvent>) -> Self {
        Self {
            active: Mutex::new(active),
            events,
        }
    }

    pub fn active(&self) -> RootId {
        *self.lock()
    }

    /// Make `id` visible. Returns whether the visible root changed.
    pub fn activate(&self, id: RootId) -> bool {
        let mut active = self.lock();
        self.switch(&mut active, id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: NavigationEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RootId> {
        self.active.lock().expect("active root mutex poisoned")
    }

    /// Switch while the caller holds the guard.
    pub(crate) fn switch(&self, active: &mut RootId, id: RootId) -> bool {
        if *active == id {
            return false;
        }
        let previous = std::mem::replace(active, id);
        self.emit(NavigationEvent::Activated { root: id, previous });
        metrics::record_activation(id);
        tracing::debug!(root = %id, previous = %previous, "Root activated");
        true
    }
}
