//! Raw inbound payloads, as the host hands them over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unparsed deep link from one of the host's system callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "payload", rename_all = "snake_case")]
pub enum RawDeepLinkPayload {
    /// URL-open callback (custom scheme or universal link).
    Url(String),
    /// Push notification user info.
    Notification(serde_json::Value),
    /// Home screen shortcut type, e.g. `"bookings"` or `"restaurant:42"`.
    Shortcut(String),
}

impl RawDeepLinkPayload {
    pub fn url(raw: impl Into<String>) -> Self {
        Self::Url(raw.into())
    }

    pub fn shortcut(raw: impl Into<String>) -> Self {
        Self::Shortcut(raw.into())
    }

    /// Label used in logs and metrics.
    pub fn source(&self) -> &'static str {
        match self {
            RawDeepLinkPayload::Url(_) => "url",
            RawDeepLinkPayload::Notification(_) => "notification",
            RawDeepLinkPayload::Shortcut(_) => "shortcut",
        }
    }
}

impl fmt::Display for RawDeepLinkPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDeepLinkPayload::Url(url) => f.write_str(url),
            RawDeepLinkPayload::Notification(value) => write!(f, "notification {}", value),
            RawDeepLinkPayload::Shortcut(kind) => write!(f, "shortcut {}", kind),
        }
    }
}
