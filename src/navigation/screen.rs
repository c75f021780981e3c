//! Screen descriptors.
//!
//! Screens are plain data. The host UI turns them into views; the routing core
//! only decides which descriptor goes on which stack.

use serde::{Deserialize, Serialize};

use crate::data::{Event, FetchError, Restaurant};
use crate::deeplink::{EventFilter, PromoCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "data", rename_all = "snake_case")]
pub enum Screen {
    Home,
    RestaurantDetail(Restaurant),
    Events,
    EventList(EventFilter),
    EventDetail(Event),
    Profile,
    BookingHistory,
    PromoCode(Option<PromoCode>),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::RestaurantDetail(_) => "restaurant_detail",
            Screen::Events => "events",
            Screen::EventList(_) => "event_list",
            Screen::EventDetail(_) => "event_detail",
            Screen::Profile => "profile",
            Screen::BookingHistory => "booking_history",
            Screen::PromoCode(_) => "promo_code",
        }
    }
}

/// User-visible error shown on top of the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAlert {
    pub title: String,
    pub message: String,
}

impl ErrorAlert {
    pub fn from_fetch_error(error: &FetchError) -> Self {
        let message = match error {
            FetchError::NotFound { kind, .. } => format!("This {} is no longer available.", kind),
            FetchError::Timeout(_) | FetchError::Transport(_) => {
                "Check your connection and try again.".to_string()
            }
            FetchError::UnexpectedKind { .. } => "Something went wrong.".to_string(),
        };
        Self {
            title: "Couldn't open link".to_string(),
            message,
        }
    }
}
