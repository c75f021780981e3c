//! Per-root router trees.
//!
//! ```text
//! home     HomeRouter                 OpenRestaurant (fetch)
//! events   EventsRouter               OpenEventList
//!            └─ EventDetailRouter     OpenEvent (fetch)
//! profile  RouterGroup "profile"
//!            ├─ BookingHistoryRouter  OpenBookingHistory
//!            └─ PromoCodeRouter       OpenPromoCode (modal)
//! ```

pub mod events;
pub mod home;
pub mod profile;

use std::sync::Arc;
use std::time::Duration;

use crate::data::EntityFetcher;
use crate::navigation::{NavigationRoot, RootId};
use crate::routing::deferred::Hydrator;
use crate::routing::node::RouterNode;

pub use events::{EventDetailRouter, EventsRouter};
pub use home::HomeRouter;
pub use profile::{profile_router, BookingHistoryRouter, PromoCodeRouter};

/// Build the router tree that sits on top of `root`.
pub fn router_tree(
    root: Arc<NavigationRoot>,
    fetcher: Arc<dyn EntityFetcher>,
    fetch_timeout: Duration,
) -> Arc<dyn RouterNode> {
    let hydrator = Hydrator::new(root.clone(), fetcher, fetch_timeout);
    let tree: Arc<dyn RouterNode> = match root.id() {
        RootId::Home => Arc::new(HomeRouter::new(hydrator)),
        RootId::Events => {
            let detail: Arc<dyn RouterNode> = Arc::new(EventDetailRouter::new(hydrator));
            Arc::new(EventsRouter::new(root, vec![detail]))
        }
        RootId::Profile => Arc::new(profile_router(root)),
    };
    tree
}
