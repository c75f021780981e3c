//! Events tab routers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::data::EntityKind;
use crate::deeplink::DeeplinkContext;
use crate::navigation::{NavigationRoot, Screen};
use crate::routing::deferred::{event_screen, Hydrator};
use crate::routing::node::RouterNode;
use crate::routing::outcome::RoutingOutcome;

/// Shows the filtered event list; delegates event pages to its children.
pub struct EventsRouter {
    root: Arc<NavigationRoot>,
    children: Vec<Arc<dyn RouterNode>>,
}

impl EventsRouter {
    pub fn new(root: Arc<NavigationRoot>, children: Vec<Arc<dyn RouterNode>>) -> Self {
        Self { root, children }
    }
}

#[async_trait]
impl RouterNode for EventsRouter {
    fn name(&self) -> &str {
        "events"
    }

    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome {
        match context {
            DeeplinkContext::OpenEventList { filter } => {
                // The list replaces whatever flow was open in this tab.
                let activated = self.root.reset_and_push(Screen::EventList(*filter));
                RoutingOutcome::Handled { activated }
            }
            _ => RoutingOutcome::Unhandled,
        }
    }

    fn children(&self) -> &[Arc<dyn RouterNode>] {
        &self.children
    }
}

/// Opens a single event after fetching it.
pub struct EventDetailRouter {
    hydrator: Hydrator,
}

impl EventDetailRouter {
    pub fn new(hydrator: Hydrator) -> Self {
        Self { hydrator }
    }
}

#[async_trait]
impl RouterNode for EventDetailRouter {
    fn name(&self) -> &str {
        "event_detail"
    }

    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome {
        match context {
            DeeplinkContext::OpenEvent { id } => RoutingOutcome::Deferred(self.hydrator.begin(
                self.name(),
                EntityKind::Event,
                *id,
                event_screen,
            )),
            _ => RoutingOutcome::Unhandled,
        }
    }
}
