//! Entity types and the fetch capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::deeplink::EntityId;

/// Kind of entity a router may need to hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Restaurant,
    Event,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Restaurant => "restaurant",
            EntityKind::Event => "event",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<EntityId>,
}

/// A hydrated entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Restaurant(Restaurant),
    Event(Event),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Restaurant(_) => EntityKind::Restaurant,
            Entity::Event(_) => EntityKind::Event,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::Restaurant(r) => r.id,
            Entity::Event(e) => e.id,
        }
    }
}

/// Errors surfaced by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("fetch timed out after {0} ms")]
    Timeout(u64),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("expected a {expected}, got a {actual}")]
    UnexpectedKind { expected: EntityKind, actual: EntityKind },
}

impl FetchError {
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "not_found",
            FetchError::Timeout(_) => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::UnexpectedKind { .. } => "unexpected_kind",
        }
    }
}

/// Async "fetch resource by identifier".
#[async_trait]
pub trait EntityFetcher: Send + Sync {
    async fn fetch_entity(&self, kind: EntityKind, id: EntityId) -> Result<Entity, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = EntityId::new(42).unwrap();
        let err = FetchError::NotFound { kind: EntityKind::Restaurant, id };
        assert_eq!(err.to_string(), "restaurant #42 not found");
        assert_eq!(FetchError::Timeout(250).to_string(), "fetch timed out after 250 ms");
    }

    #[test]
    fn test_entity_accessors() {
        let id = EntityId::new(3).unwrap();
        let entity = Entity::Event(Event { id, title: "Jazz night".into(), tags: vec![] });
        assert_eq!(entity.kind(), EntityKind::Event);
        assert_eq!(entity.id(), id);
    }
}
