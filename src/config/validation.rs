//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (owners and initial root are configured tabs)
//! - Validate value ranges (timeouts > 0, scheme shape, no web schemes)
//! - Detect duplicate tabs and seeded entity ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::deeplink::{EntityId, IntentKind};
use crate::navigation::RootId;
use crate::routing::OwnershipMap;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deeplinks.scheme '{0}' is not a valid URL scheme")]
    InvalidScheme(String),

    #[error("deeplinks.scheme '{0}' is reserved for universal links")]
    ReservedScheme(String),

    #[error("navigation.tabs must not be empty")]
    NoTabs,

    #[error("navigation.tabs lists '{0}' more than once")]
    DuplicateTab(RootId),

    #[error("navigation.initial_root '{0}' is not a configured tab")]
    InitialRootNotATab(RootId),

    #[error("intent '{intent}' is owned by '{root}', which is not a configured tab")]
    OwnerNotATab { intent: IntentKind, root: RootId },

    #[error("data.fetch_timeout_ms must be greater than zero")]
    ZeroFetchTimeout,

    #[error("data.{list} seeds id {id} more than once")]
    DuplicateSeed { list: &'static str, id: EntityId },
}

/// Check the whole config, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let scheme = &config.deeplinks.scheme;
    let scheme_ok = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        errors.push(ValidationError::InvalidScheme(scheme.clone()));
    } else if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        errors.push(ValidationError::ReservedScheme(scheme.clone()));
    }

    let nav = &config.navigation;
    if nav.tabs.is_empty() {
        errors.push(ValidationError::NoTabs);
    }
    let mut seen = HashSet::new();
    for tab in &nav.tabs {
        if !seen.insert(*tab) {
            errors.push(ValidationError::DuplicateTab(*tab));
        }
    }
    if !nav.tabs.contains(&nav.initial_root) {
        errors.push(ValidationError::InitialRootNotATab(nav.initial_root));
    }

    let ownership = OwnershipMap::from_config(nav);
    for intent in IntentKind::ALL {
        let root = ownership.owner(intent);
        if !nav.tabs.contains(&root) {
            errors.push(ValidationError::OwnerNotATab { intent, root });
        }
    }

    if config.data.fetch_timeout_ms == 0 {
        errors.push(ValidationError::ZeroFetchTimeout);
    }

    let mut restaurant_ids = HashSet::new();
    for restaurant in &config.data.restaurants {
        if !restaurant_ids.insert(restaurant.id) {
            errors.push(ValidationError::DuplicateSeed { list: "restaurants", id: restaurant.id });
        }
    }
    let mut event_ids = HashSet::new();
    for event in &config.data.events {
        if !event_ids.insert(event.id) {
            errors.push(ValidationError::DuplicateSeed { list: "events", id: event.id });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Restaurant;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.deeplinks.scheme = "9app".to_string();
        config.navigation.tabs = vec![RootId::Events, RootId::Events];
        config.data.fetch_timeout_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidScheme("9app".into())));
        assert!(errors.contains(&ValidationError::DuplicateTab(RootId::Events)));
        assert!(errors.contains(&ValidationError::InitialRootNotATab(RootId::Home)));
        assert!(errors.contains(&ValidationError::OwnerNotATab {
            intent: IntentKind::Restaurant,
            root: RootId::Home,
        }));
        assert!(errors.contains(&ValidationError::ZeroFetchTimeout));
    }

    #[test]
    fn test_web_schemes_are_reserved() {
        for scheme in ["https", "HTTP"] {
            let mut config = AppConfig::default();
            config.deeplinks.scheme = scheme.to_string();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::ReservedScheme(scheme.into())])
            );
        }
    }

    #[test]
    fn test_duplicate_seed() {
        let mut config = AppConfig::default();
        let id = EntityId::new(1).unwrap();
        config.data.restaurants = vec![
            Restaurant { id, name: "a".into() },
            Restaurant { id, name: "b".into() },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateSeed { list: "restaurants", id }]);
    }
}
