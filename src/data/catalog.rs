//! In-memory entity catalog.
//!
//! Backs the demo binary and tests. Seeded from the `[data]` config section,
//! with optional simulated latency and injectable transport failures.

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::config::DataConfig;
use crate::data::fetcher::{Entity, EntityFetcher, EntityKind, FetchError};
use crate::deeplink::EntityId;
use crate::observability::metrics;

/// Thread-safe catalog keyed by (kind, id).
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entities: Arc<DashMap<(EntityKind, EntityId), Entity>>,
    failing: Arc<DashSet<(EntityKind, EntityId)>>,
    latency: Duration,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the seed lists in the data config.
    pub fn from_config(config: &DataConfig) -> Self {
        let catalog = Self::new().with_latency(Duration::from_millis(config.simulated_latency_ms));
        for restaurant in &config.restaurants {
            catalog.insert(Entity::Restaurant(restaurant.clone()));
        }
        for event in &config.events {
            catalog.insert(Entity::Event(event.clone()));
        }
        tracing::debug!(entities = catalog.len(), "Catalog seeded");
        catalog
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn insert(&self, entity: Entity) {
        self.entities.insert((entity.kind(), entity.id()), entity);
    }

    /// Make every fetch of this entity fail with a transport error.
    pub fn fail(&self, kind: EntityKind, id: EntityId) {
        self.failing.insert((kind, id));
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl EntityFetcher for InMemoryCatalog {
    async fn fetch_entity(&self, kind: EntityKind, id: EntityId) -> Result<Entity, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = if self.failing.contains(&(kind, id)) {
            Err(FetchError::Transport(format!("{} #{} unavailable", kind, id)))
        } else {
            self.entities
                .get(&(kind, id))
                .map(|r| r.value().clone())
                .ok_or(FetchError::NotFound { kind, id })
        };

        metrics::record_fetch(kind, result.as_ref().err());
        result
    }
}
