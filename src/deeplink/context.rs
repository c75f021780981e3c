//! Parsed deep link intents.
//!
//! A [`DeeplinkContext`] is the only thing router nodes look at when deciding
//! whether a request is theirs. It is built by the parser, never mutated
//! afterwards, and cheap to clone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Identifier of a backend entity (restaurant, event, tag). Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct EntityId(NonZeroU64);

impl EntityId {
    /// Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for EntityId {
    type Error = String;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "entity id must be non-zero".to_string())
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.get()
    }
}

impl FromStr for EntityId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u64::from_str accepts a leading '+', identifiers don't.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        s.parse::<u64>().ok().and_then(Self::new).ok_or(())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Promo code carried by a promo deep link, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromoCode(String);

impl PromoCode {
    pub const MAX_LEN: usize = 32;

    /// Validate and normalize a raw code.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter applied to the event list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only show events carrying this tag.
    pub tag: Option<EntityId>,
}

/// Kind of intent, used as the key of the ownership map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Restaurant,
    Event,
    EventList,
    BookingHistory,
    PromoCode,
}

impl IntentKind {
    pub const ALL: [IntentKind; 5] = [
        IntentKind::Restaurant,
        IntentKind::Event,
        IntentKind::EventList,
        IntentKind::BookingHistory,
        IntentKind::PromoCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntentKind::Restaurant => "restaurant",
            IntentKind::Event => "event",
            IntentKind::EventList => "event_list",
            IntentKind::BookingHistory => "booking_history",
            IntentKind::PromoCode => "promo_code",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum DeeplinkContext {
    OpenRestaurant { id: EntityId },
    OpenEvent { id: EntityId },
    OpenEventList { filter: EventFilter },
    OpenBookingHistory,
    OpenPromoCode { code: Option<PromoCode> },
}

impl DeeplinkContext {
    pub fn kind(&self) -> IntentKind {
        match self {
            DeeplinkContext::OpenRestaurant { .. } => IntentKind::Restaurant,
            DeeplinkContext::OpenEvent { .. } => IntentKind::Event,
            DeeplinkContext::OpenEventList { .. } => IntentKind::EventList,
            DeeplinkContext::OpenBookingHistory => IntentKind::BookingHistory,
            DeeplinkContext::OpenPromoCode { .. } => IntentKind::PromoCode,
        }
    }
}

impl fmt::Display for DeeplinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeeplinkContext::OpenRestaurant { id } => write!(f, "restaurant #{}", id),
            DeeplinkContext::OpenEvent { id } => write!(f, "event #{}", id),
            DeeplinkContext::OpenEventList { filter } => match filter.tag {
                Some(tag) => write!(f, "event list (tag #{})", tag),
                None => f.write_str("event list"),
            },
            DeeplinkContext::OpenBookingHistory => f.write_str("booking history"),
            DeeplinkContext::OpenPromoCode { code } => match code {
                Some(code) => write!(f, "promo code {}", code),
                None => f.write_str("promo code"),
            },
        }
    }
}
