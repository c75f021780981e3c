//! Static intent → root mapping.
//!
//! This is the container's only routing knowledge: which root should try a
//! context, never how that root satisfies it.

use std::collections::BTreeMap;

use crate::config::NavigationConfig;
use crate::deeplink::IntentKind;
use crate::navigation::RootId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipMap {
    overrides: BTreeMap<IntentKind, RootId>,
}

impl OwnershipMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            overrides: config.ownership.clone(),
        }
    }

    /// Route `intent` to `root` instead of its default owner.
    pub fn with(mut self, intent: IntentKind, root: RootId) -> Self {
        self.overrides.insert(intent, root);
        self
    }

    pub fn default_owner(intent: IntentKind) -> RootId {
        match intent {
            IntentKind::Restaurant => RootId::Home,
            IntentKind::Event | IntentKind::EventList => RootId::Events,
            IntentKind::BookingHistory | IntentKind::PromoCode => RootId::Profile,
        }
    }

    pub fn owner(&self, intent: IntentKind) -> RootId {
        self.overrides
            .get(&intent)
            .copied()
            .unwrap_or_else(|| Self::default_owner(intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let map = OwnershipMap::new();
        assert_eq!(map.owner(IntentKind::Restaurant), RootId::Home);
        assert_eq!(map.owner(IntentKind::Event), RootId::Events);
        assert_eq!(map.owner(IntentKind::PromoCode), RootId::Profile);

        let map = map.with(IntentKind::Event, RootId::Home);
        assert_eq!(map.owner(IntentKind::Event), RootId::Home);
        assert_eq!(map.owner(IntentKind::EventList), RootId::Events);
    }
}
