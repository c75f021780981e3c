//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::{Event, Restaurant};
use crate::deeplink::IntentKind;
use crate::navigation::RootId;

/// Root configuration for the deep link router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Accepted link formats.
    pub deeplinks: DeeplinkConfig,

    /// Tabs and intent ownership.
    pub navigation: NavigationConfig,

    /// Data layer settings and demo catalog.
    pub data: DataConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deep link formats.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeeplinkConfig {
    /// Custom URL scheme (e.g., "app" for `app://restaurant/42`).
    pub scheme: String,

    /// Hosts whose https links are treated as deep links.
    pub universal_link_hosts: Vec<String>,
}

impl Default for DeeplinkConfig {
    fn default() -> Self {
        Self {
            scheme: "app".to_string(),
            universal_link_hosts: Vec::new(),
        }
    }
}

/// Navigation roots and the static intent → root mapping.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Tabs in display order.
    pub tabs: Vec<RootId>,

    /// Root visible at startup.
    pub initial_root: RootId,

    /// Overrides for the default owner of each intent.
    pub ownership: BTreeMap<IntentKind, RootId>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            tabs: RootId::ALL.to_vec(),
            initial_root: RootId::Home,
            ownership: BTreeMap::new(),
        }
    }
}

/// Data layer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Upper bound on a single entity fetch in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Artificial delay added by the in-memory catalog.
    pub simulated_latency_ms: u64,

    /// Restaurants seeded into the in-memory catalog.
    pub restaurants: Vec<Restaurant>,

    /// Events seeded into the in-memory catalog.
    pub events: Vec<Event>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 10_000,
            simulated_latency_ms: 0,
            restaurants: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.deeplinks.scheme, "app");
        assert_eq!(config.navigation.tabs, RootId::ALL.to_vec());
        assert_eq!(config.navigation.initial_root, RootId::Home);
        assert_eq!(config.data.fetch_timeout_ms, 10_000);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [navigation]
            initial_root = "events"

            [navigation.ownership]
            event = "home"

            [[data.restaurants]]
            id = 42
            name = "Varenichnaya"
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.initial_root, RootId::Events);
        assert_eq!(config.navigation.ownership.get(&IntentKind::Event), Some(&RootId::Home));
        assert_eq!(config.data.restaurants[0].id.get(), 42);
        assert_eq!(config.observability.log_level, "info");
    }
}
