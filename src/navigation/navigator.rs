//! The set of navigation roots and the active-root pointer.
//!
//! This is the process-wide navigation state. It is constructed once and
//! passed to whoever needs it; there is no global instance.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::navigation::focus::Focus;
use crate::navigation::root::{NavigationError, NavigationRoot, RootId, RootSnapshot};
use crate::navigation::screen::{ErrorAlert, Screen};

const EVENT_CAPACITY: usize = 256;

/// A navigation command, published for the host UI to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    Activated { root: RootId, previous: RootId },
    Pushed { root: RootId, screen: Screen },
    Popped { root: RootId, screen: Screen },
    Reset { root: RootId, removed: usize },
    Presented { root: RootId, screen: Screen },
    Dismissed { root: RootId },
    AlertShown { root: RootId, alert: ErrorAlert },
}

/// Point-in-time view of all roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub active: RootId,
    pub roots: Vec<RootSnapshot>,
}

impl NavigationSnapshot {
    pub fn root(&self, id: RootId) -> Option<&RootSnapshot> {
        self.roots.iter().find(|r| r.id == id)
    }
}

/// Owns every navigation root and tracks which one is visible.
#[derive(Debug)]
pub struct Navigator {
    roots: Vec<Arc<NavigationRoot>>,
    focus: Arc<Focus>,
}

impl Navigator {
    /// Create one root per tab, in tab order.
    ///
    /// An empty tab list falls back to every known root; an initial root that
    /// is not a tab falls back to the first tab.
    pub fn new(tabs: &[RootId], initial: RootId) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let mut ids: Vec<RootId> = Vec::new();
        for id in if tabs.is_empty() { &RootId::ALL[..] } else { tabs } {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }

        let active = if ids.contains(&initial) {
            initial
        } else {
            tracing::warn!(initial = %initial, fallback = %ids[0], "Initial root is not a tab");
            ids[0]
        };

        let focus = Arc::new(Focus::new(active, events));
        let roots = ids
            .into_iter()
            .map(|id| Arc::new(NavigationRoot::new(id, focus.clone())))
            .collect();

        Self { roots, focus }
    }

    pub fn root(&self, id: RootId) -> Option<Arc<NavigationRoot>> {
        self.roots.iter().find(|r| r.id() == id).cloned()
    }

    pub fn roots(&self) -> &[Arc<NavigationRoot>] {
        &self.roots
    }

    pub fn active(&self) -> RootId {
        self.focus.active()
    }

    /// Make `id` the visible root. Its stack is left as it was.
    ///
    /// Returns `Ok(true)` if the active root changed.
    pub fn activate(&self, id: RootId) -> Result<bool, NavigationError> {
        if self.root(id).is_none() {
            return Err(NavigationError::UnknownRoot(id));
        }
        Ok(self.focus.activate(id))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.focus.subscribe()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        let active = self.active();
        NavigationSnapshot {
            active,
            roots: self.roots.iter().map(|r| r.snapshot()).collect(),
        }
    }
}
