//! Home tab router.

use async_trait::async_trait;

use crate::data::EntityKind;
use crate::deeplink::DeeplinkContext;
use crate::routing::deferred::{restaurant_screen, Hydrator};
use crate::routing::node::RouterNode;
use crate::routing::outcome::RoutingOutcome;

/// Opens restaurant pages. Restaurants are fetched before the push.
pub struct HomeRouter {
    hydrator: Hydrator,
}

impl HomeRouter {
    pub fn new(hydrator: Hydrator) -> Self {
        Self { hydrator }
    }
}

#[async_trait]
impl RouterNode for HomeRouter {
    fn name(&self) -> &str {
        "home"
    }

    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome {
        match context {
            DeeplinkContext::OpenRestaurant { id } => RoutingOutcome::Deferred(self.hydrator.begin(
                self.name(),
                EntityKind::Restaurant,
                *id,
                restaurant_screen,
            )),
            _ => RoutingOutcome::Unhandled,
        }
    }
}
