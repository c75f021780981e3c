//! Profile tab routers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::deeplink::DeeplinkContext;
use crate::navigation::{NavigationRoot, Screen};
use crate::routing::node::{RouterGroup, RouterNode};
use crate::routing::outcome::RoutingOutcome;

/// Profile has no screens of its own to open, only nested flows.
pub fn profile_router(root: Arc<NavigationRoot>) -> RouterGroup {
    let bookings: Arc<dyn RouterNode> = Arc::new(BookingHistoryRouter::new(root.clone()));
    let promo: Arc<dyn RouterNode> = Arc::new(PromoCodeRouter::new(root));
    RouterGroup::new("profile", vec![bookings, promo])
}

pub struct BookingHistoryRouter {
    root: Arc<NavigationRoot>,
}

impl BookingHistoryRouter {
    pub fn new(root: Arc<NavigationRoot>) -> Self {
        Self { root }
    }
}

#[async_trait]
impl RouterNode for BookingHistoryRouter {
    fn name(&self) -> &str {
        "booking_history"
    }

    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome {
        match context {
            DeeplinkContext::OpenBookingHistory => {
                let activated = self.root.push_unless_top(Screen::BookingHistory);
                RoutingOutcome::Handled { activated }
            }
            _ => RoutingOutcome::Unhandled,
        }
    }
}

/// Presents the promo code sheet modally, prefilled when the link carries a code.
pub struct PromoCodeRouter {
    root: Arc<NavigationRoot>,
}

impl PromoCodeRouter {
    pub fn new(root: Arc<NavigationRoot>) -> Self {
        Self { root }
    }
}

#[async_trait]
impl RouterNode for PromoCodeRouter {
    fn name(&self) -> &str {
        "promo_code"
    }

    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome {
        match context {
            DeeplinkContext::OpenPromoCode { code } => {
                let activated = self.root.present(Screen::PromoCode(code.clone()));
                RoutingOutcome::Handled { activated }
            }
            _ => RoutingOutcome::Unhandled,
        }
    }
}
