//! A single navigation root (tab) and its back stack.
//!
//! # Responsibilities
//! - Own the back stack and modal slot of one tab
//! - Expose push/present/pop primitives to router nodes
//! - Expire liveness tokens of screens that get torn down
//! - Publish every mutation as a NavigationEvent
//!
//! # Design Decisions
//! - The stack is never empty; index 0 is the root screen and cannot be popped
//! - Each primitive is one critical section; the lock is never held across await
//! - Liveness checks happen under the same lock as the mutation they guard
//! - Mutations that show a deep link target also make the root visible, taking
//!   the focus lock before the root lock; each reports whether it switched tabs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::navigation::focus::Focus;
use crate::navigation::liveness::LivenessToken;
use crate::navigation::navigator::NavigationEvent;
use crate::navigation::screen::{ErrorAlert, Screen};

/// Identifier of a navigation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootId {
    Home,
    Events,
    Profile,
}

impl RootId {
    pub const ALL: [RootId; 3] = [RootId::Home, RootId::Events, RootId::Profile];

    pub fn as_str(self) -> &'static str {
        match self {
            RootId::Home => "home",
            RootId::Events => "events",
            RootId::Profile => "profile",
        }
    }

    /// Screen at the bottom of this root's stack.
    pub fn root_screen(self) -> Screen {
        match self {
            RootId::Home => Screen::Home,
            RootId::Events => Screen::Events,
            RootId::Profile => Screen::Profile,
        }
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a navigation primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("root '{0}' is not configured")]
    UnknownRoot(RootId),

    #[error("owning screen was torn down")]
    Expired,
}

#[derive(Debug)]
struct ScreenEntry {
    screen: Screen,
    alerts: Vec<ErrorAlert>,
    liveness: LivenessToken,
}

impl ScreenEntry {
    fn new(screen: Screen) -> Self {
        Self {
            screen,
            alerts: Vec::new(),
            liveness: LivenessToken::new(),
        }
    }

    fn tear_down(self) -> Screen {
        self.liveness.expire();
        self.screen
    }
}

#[derive(Debug)]
struct RootState {
    stack: Vec<ScreenEntry>,
    modal: Option<ScreenEntry>,
}

impl RootState {
    fn top(&self) -> &ScreenEntry {
        // stack is never empty
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut ScreenEntry {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

/// Point-in-time view of one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootSnapshot {
    pub id: RootId,
    pub stack: Vec<Screen>,
    pub modal: Option<Screen>,
    /// Alerts attached to the top of the stack.
    pub alerts: Vec<ErrorAlert>,
}

/// One tab's navigation stack.
#[derive(Debug)]
pub struct NavigationRoot {
    id: RootId,
    state: Mutex<RootState>,
    focus: Arc<Focus>,
}

impl NavigationRoot {
    pub fn new(id: RootId, focus: Arc<Focus>) -> Self {
        Self {
            id,
            state: Mutex::new(RootState {
                stack: vec![ScreenEntry::new(id.root_screen())],
                modal: None,
            }),
            focus,
        }
    }

    pub fn id(&self) -> RootId {
        self.id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RootState> {
        self.state.lock().expect("navigation root mutex poisoned")
    }

    fn emit(&self, event: NavigationEvent) {
        self.focus.emit(event);
    }

    /// Make this root visible and mutate it in one critical section.
    fn to_front<T>(&self, mutate: impl FnOnce(&mut RootState) -> T) -> (bool, T) {
        let mut active = self.focus.lock();
        let mut state = self.lock();
        let activated = self.focus.switch(&mut *active, self.id);
        (activated, mutate(&mut *state))
    }

    /// Like `to_front`, but nothing happens once `token` has expired.
    fn to_front_if_live(
        &self,
        token: &LivenessToken,
        mutate: impl FnOnce(&mut RootState),
    ) -> Result<bool, NavigationError> {
        let mut active = self.focus.lock();
        let mut state = self.lock();
        if !token.is_live() {
            return Err(NavigationError::Expired);
        }
        let activated = self.focus.switch(&mut *active, self.id);
        mutate(&mut *state);
        Ok(activated)
    }

    /// Screen currently on top of the stack.
    pub fn top(&self) -> Screen {
        self.lock().top().screen.clone()
    }

    pub fn depth(&self) -> usize {
        self.lock().stack.len()
    }

    /// Token tied to the screen currently on top of the stack.
    pub fn liveness(&self) -> LivenessToken {
        self.lock().top().liveness.child()
    }

    pub fn push(&self, screen: Screen) {
        let mut state = self.lock();
        state.stack.push(ScreenEntry::new(screen.clone()));
        self.emit(NavigationEvent::Pushed { root: self.id, screen });
    }

    /// Bring the root to the front and push, only if the screen that issued
    /// `token` is still on the stack. Returns whether the root was activated.
    pub fn push_if_live(&self, screen: Screen, token: &LivenessToken) -> Result<bool, NavigationError> {
        self.to_front_if_live(token, |state| {
            tracing::debug!(root = %self.id, screen = screen.name(), "Screen pushed");
            state.stack.push(ScreenEntry::new(screen.clone()));
            self.emit(NavigationEvent::Pushed { root: self.id, screen });
        })
    }

    /// Bring the root to the front and push, unless an equal screen is
    /// already on top. Returns whether the root was activated.
    pub fn push_unless_top(&self, screen: Screen) -> bool {
        let (activated, ()) = self.to_front(|state| {
            if state.top().screen == screen {
                tracing::debug!(root = %self.id, screen = screen.name(), "Screen already on top");
                return;
            }
            state.stack.push(ScreenEntry::new(screen.clone()));
            self.emit(NavigationEvent::Pushed { root: self.id, screen });
        });
        activated
    }

    /// Bring the root to the front, drop everything above the root screen,
    /// then push `screen`, as one step. Returns whether the root was activated.
    pub fn reset_and_push(&self, screen: Screen) -> bool {
        let (activated, ()) = self.to_front(|state| {
            let removed = Self::truncate_to_root(state);
            if removed > 0 {
                self.emit(NavigationEvent::Reset { root: self.id, removed });
            }
            state.stack.push(ScreenEntry::new(screen.clone()));
            self.emit(NavigationEvent::Pushed { root: self.id, screen });
        });
        activated
    }

    /// Pop the top screen. The root screen is never popped.
    pub fn pop(&self) -> Option<Screen> {
        let mut state = self.lock();
        if state.stack.len() <= 1 {
            return None;
        }
        let screen = state.stack.pop().map(ScreenEntry::tear_down)?;
        self.emit(NavigationEvent::Popped { root: self.id, screen: screen.clone() });
        Some(screen)
    }

    /// Pop back to the root screen. Returns how many screens were removed.
    pub fn pop_to_root(&self) -> usize {
        let mut state = self.lock();
        let removed = Self::truncate_to_root(&mut state);
        if removed > 0 {
            self.emit(NavigationEvent::Reset { root: self.id, removed });
        }
        removed
    }

    fn truncate_to_root(state: &mut RootState) -> usize {
        let removed = state.stack.len() - 1;
        for entry in state.stack.drain(1..) {
            entry.tear_down();
        }
        removed
    }

    /// Bring the root to the front and present a modal, replacing the
    /// current one. Returns whether the root was activated.
    pub fn present(&self, screen: Screen) -> bool {
        let (activated, ()) = self.to_front(|state| {
            if let Some(previous) = state.modal.take() {
                previous.tear_down();
            }
            state.modal = Some(ScreenEntry::new(screen.clone()));
            self.emit(NavigationEvent::Presented { root: self.id, screen });
        });
        activated
    }

    pub fn dismiss(&self) -> Option<Screen> {
        let mut state = self.lock();
        let screen = state.modal.take().map(ScreenEntry::tear_down)?;
        self.emit(NavigationEvent::Dismissed { root: self.id });
        Some(screen)
    }

    pub fn modal(&self) -> Option<Screen> {
        self.lock().modal.as_ref().map(|entry| entry.screen.clone())
    }

    /// Bring the root to the front and attach an alert to its top screen, if
    /// the issuing screen is still alive. Returns whether the root was activated.
    pub fn show_error_if_live(&self, alert: ErrorAlert, token: &LivenessToken) -> Result<bool, NavigationError> {
        self.to_front_if_live(token, |state| {
            state.top_mut().alerts.push(alert.clone());
            self.emit(NavigationEvent::AlertShown { root: self.id, alert });
        })
    }

    pub fn snapshot(&self) -> RootSnapshot {
        let state = self.lock();
        RootSnapshot {
            id: self.id,
            stack: state.stack.iter().map(|e| e.screen.clone()).collect(),
            modal: state.modal.as_ref().map(|e| e.screen.clone()),
            alerts: state.top().alerts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast;

    fn root(id: RootId) -> (NavigationRoot, broadcast::Receiver<NavigationEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (NavigationRoot::new(id, Arc::new(Focus::new(id, tx))), rx)
    }

    #[test]
    fn test_root_screen_cannot_be_popped() {
        let (root, _rx) = root(RootId::Profile);
        assert_eq!(root.top(), Screen::Profile);
        assert_eq!(root.pop(), None);
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_pop_expires_liveness() {
        let (root, _rx) = root(RootId::Profile);
        root.push(Screen::BookingHistory);
        let token = root.liveness();

        assert_eq!(root.pop(), Some(Screen::BookingHistory));
        assert!(!token.is_live());
        assert_eq!(
            root.push_if_live(Screen::PromoCode(None), &token),
            Err(NavigationError::Expired)
        );
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_push_over_owner_keeps_it_alive() {
        let (root, _rx) = root(RootId::Home);
        let token = root.liveness();
        root.push(Screen::Profile);
        assert!(token.is_live());
        assert!(root.push_if_live(Screen::BookingHistory, &token).is_ok());
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_reset_and_push_is_one_step() {
        let (root, mut rx) = root(RootId::Events);
        root.push(Screen::BookingHistory);
        root.push(Screen::Profile);
        let _ = rx.try_recv();
        let _ = rx.try_recv();

        root.reset_and_push(Screen::Home);
        assert_eq!(root.snapshot().stack, vec![Screen::Events, Screen::Home]);
        assert_eq!(rx.try_recv().unwrap(), NavigationEvent::Reset { root: RootId::Events, removed: 2 });
        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationEvent::Pushed { root: RootId::Events, screen: Screen::Home }
        );
    }

    #[test]
    fn test_push_unless_top() {
        let (root, _rx) = root(RootId::Profile);
        root.push_unless_top(Screen::BookingHistory);
        root.push_unless_top(Screen::BookingHistory);
        assert_eq!(root.snapshot().stack, vec![Screen::Profile, Screen::BookingHistory]);
    }

    #[test]
    fn test_live_push_brings_root_to_front() {
        let (tx, mut rx) = broadcast::channel(16);
        let focus = Arc::new(Focus::new(RootId::Profile, tx));
        let home = NavigationRoot::new(RootId::Home, focus.clone());
        let token = home.liveness();

        assert_eq!(home.push_if_live(Screen::Events, &token), Ok(true));
        assert_eq!(home.push_if_live(Screen::Profile, &token), Ok(false));
        assert_eq!(focus.active(), RootId::Home);
        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationEvent::Activated { root: RootId::Home, previous: RootId::Profile }
        );
        assert!(matches!(rx.try_recv().unwrap(), NavigationEvent::Pushed { root: RootId::Home, .. }));
    }

    #[test]
    fn test_expired_token_leaves_focus_alone() {
        let (tx, mut rx) = broadcast::channel(16);
        let focus = Arc::new(Focus::new(RootId::Profile, tx));
        let home = NavigationRoot::new(RootId::Home, focus.clone());
        home.push(Screen::Events);
        let token = home.liveness();
        home.pop();
        let _ = rx.try_recv();
        let _ = rx.try_recv();

        let alert = ErrorAlert { title: "t".into(), message: "m".into() };
        assert_eq!(home.show_error_if_live(alert, &token), Err(NavigationError::Expired));
        assert_eq!(focus.active(), RootId::Profile);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_synchronous_mutations_report_activation() {
        let (tx, _rx) = broadcast::channel(16);
        let focus = Arc::new(Focus::new(RootId::Home, tx));
        let events = NavigationRoot::new(RootId::Events, focus.clone());
        let profile = NavigationRoot::new(RootId::Profile, focus.clone());

        assert!(events.reset_and_push(Screen::EventList(Default::default())));
        assert!(profile.present(Screen::PromoCode(None)));
        assert!(!profile.push_unless_top(Screen::BookingHistory));
        assert!(events.push_unless_top(Screen::BookingHistory));
        assert_eq!(focus.active(), RootId::Events);
        // pushing alone never switches tabs
        profile.push(Screen::Profile);
        assert_eq!(focus.active(), RootId::Events);
    }

    #[test]
    fn test_present_replaces_modal() {
        let (root, _rx) = root(RootId::Profile);
        root.present(Screen::PromoCode(None));
        root.present(Screen::BookingHistory);
        assert_eq!(root.modal(), Some(Screen::BookingHistory));
        assert_eq!(root.dismiss(), Some(Screen::BookingHistory));
        assert_eq!(root.modal(), None);
    }

    #[test]
    fn test_alert_attaches_to_top() {
        let (root, _rx) = root(RootId::Home);
        let token = root.liveness();
        let alert = ErrorAlert { title: "t".into(), message: "m".into() };
        root.show_error_if_live(alert.clone(), &token).unwrap();

        let snapshot = root.snapshot();
        assert_eq!(snapshot.stack, vec![Screen::Home]);
        assert_eq!(snapshot.alerts, vec![alert]);
    }
}
