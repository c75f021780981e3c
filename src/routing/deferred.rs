//! Fetch-then-push routing shared by nodes that need an entity first.
//!
//! # Flow
//! ```text
//! route_local recognizes the context
//!     → capture liveness token of the root's top screen
//!     → return Deferred(future)
//! future:
//!     fetch (bounded by timeout) | token expired → Discarded
//!     Ok(entity)  → push_if_live           → Presented / Discarded
//!     Err(error)  → show_error_if_live     → ErrorSurfaced / Discarded
//! ```
//!
//! The push or alert also brings the root to the front, so whichever attempt
//! finishes last decides the visible screen.

use std::sync::Arc;
use std::time::Duration;

use crate::data::{Entity, EntityFetcher, EntityKind, FetchError};
use crate::deeplink::EntityId;
use crate::navigation::{ErrorAlert, NavigationRoot, Screen};
use crate::routing::outcome::{DeferredRoute, Resolution};

/// Turns a fetched entity into the screen to push.
pub type ScreenBuilder = fn(Entity) -> Result<Screen, FetchError>;

/// Everything a node needs to hydrate an entity onto its root.
#[derive(Clone)]
pub struct Hydrator {
    root: Arc<NavigationRoot>,
    fetcher: Arc<dyn EntityFetcher>,
    timeout: Duration,
}

impl Hydrator {
    pub fn new(root: Arc<NavigationRoot>, fetcher: Arc<dyn EntityFetcher>, timeout: Duration) -> Self {
        Self { root, fetcher, timeout }
    }

    /// Start a deferred attempt owned by the screen currently on top of the root.
    pub fn begin(&self, node: &str, kind: EntityKind, id: EntityId, build: ScreenBuilder) -> DeferredRoute {
        let token = self.root.liveness();
        let root = self.root.clone();
        let fetcher = self.fetcher.clone();
        let timeout = self.timeout;
        let node_name = node.to_string();

        DeferredRoute::new(node, async move {
            let fetched = tokio::select! {
                _ = token.expired() => {
                    tracing::debug!(node = %node_name, %kind, %id, "Owning screen torn down during fetch");
                    return Resolution::Discarded;
                }
                result = tokio::time::timeout(timeout, fetcher.fetch_entity(kind, id)) => {
                    result.unwrap_or_else(|_| Err(FetchError::Timeout(timeout.as_millis() as u64)))
                }
            };

            match fetched.and_then(build) {
                Ok(screen) => match root.push_if_live(screen, &token) {
                    Ok(activated) => Resolution::Presented { activated },
                    Err(_) => {
                        tracing::debug!(node = %node_name, %kind, %id, "Fetched entity discarded");
                        Resolution::Discarded
                    }
                },
                Err(error) => {
                    tracing::warn!(node = %node_name, %kind, %id, error = %error, "Deep link target unavailable");
                    let alert = ErrorAlert::from_fetch_error(&error);
                    match root.show_error_if_live(alert, &token) {
                        Ok(activated) => Resolution::ErrorSurfaced { error, activated },
                        Err(_) => Resolution::Discarded,
                    }
                }
            }
        })
    }
}

pub fn restaurant_screen(entity: Entity) -> Result<Screen, FetchError> {
    match entity {
        Entity::Restaurant(restaurant) => Ok(Screen::RestaurantDetail(restaurant)),
        other => Err(FetchError::UnexpectedKind {
            expected: EntityKind::Restaurant,
            actual: other.kind(),
        }),
    }
}

pub fn event_screen(entity: Entity) -> Result<Screen, FetchError> {
    match entity {
        Entity::Event(event) => Ok(Screen::EventDetail(event)),
        other => Err(FetchError::UnexpectedKind {
            expected: EntityKind::Event,
            actual: other.kind(),
        }),
    }
}
