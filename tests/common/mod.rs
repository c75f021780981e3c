//! Shared fixtures for dispatch integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};

use deeplink_router::data::{Entity, EntityFetcher, EntityKind, Event, FetchError, InMemoryCatalog, Restaurant};
use deeplink_router::deeplink::EntityId;
use deeplink_router::navigation::{NavigationEvent, Navigator, RootId};
use deeplink_router::routing::OwnershipMap;
use deeplink_router::RootModuleContainer;

pub fn id(raw: u64) -> EntityId {
    EntityId::new(raw).unwrap()
}

pub fn restaurant(raw: u64, name: &str) -> Entity {
    Entity::Restaurant(Restaurant { id: id(raw), name: name.to_string() })
}

pub fn event(raw: u64, title: &str) -> Entity {
    Entity::Event(Event { id: id(raw), title: title.to_string(), tags: vec![] })
}

/// Catalog with a few restaurants and events.
pub fn seeded_catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    for (raw, name) in [(1, "Blini"), (2, "Shashlik"), (42, "Chebureki")] {
        catalog.insert(restaurant(raw, name));
    }
    for (raw, title) in [(5, "Jazz night"), (6, "Standup"), (7, "Quiz")] {
        catalog.insert(event(raw, title));
    }
    catalog
}

/// Fetcher that holds every request until the test releases it.
#[derive(Clone)]
pub struct GatedFetcher {
    inner: InMemoryCatalog,
    gates: Arc<Mutex<HashMap<(EntityKind, EntityId), Arc<Semaphore>>>>,
    started: mpsc::UnboundedSender<(EntityKind, EntityId)>,
}

impl GatedFetcher {
    pub fn new(inner: InMemoryCatalog) -> (Self, mpsc::UnboundedReceiver<(EntityKind, EntityId)>) {
        let (started, rx) = mpsc::unbounded_channel();
        (
            Self {
                inner,
                gates: Arc::new(Mutex::new(HashMap::new())),
                started,
            },
            rx,
        )
    }

    fn gate(&self, kind: EntityKind, id: EntityId) -> Arc<Semaphore> {
        self.gates
            .lock()
            .unwrap()
            .entry((kind, id))
            .or_insert_with(|| Arc::new(Semaphore::new(0)))
            .clone()
    }

    /// Let one pending (or future) fetch of this entity complete.
    pub fn release(&self, kind: EntityKind, id: EntityId) {
        self.gate(kind, id).add_permits(1);
    }
}

#[async_trait]
impl EntityFetcher for GatedFetcher {
    async fn fetch_entity(&self, kind: EntityKind, id: EntityId) -> Result<Entity, FetchError> {
        let gate = self.gate(kind, id);
        let _ = self.started.send((kind, id));
        gate.acquire().await.expect("gate closed").forget();
        self.inner.fetch_entity(kind, id).await
    }
}

/// Container over all three roots with the standard feature routers.
pub fn container_with(
    fetcher: Arc<dyn EntityFetcher>,
    initial: RootId,
    ownership: OwnershipMap,
    fetch_timeout: Duration,
) -> RootModuleContainer {
    let navigator = Arc::new(Navigator::new(&RootId::ALL, initial));
    RootModuleContainer::builder(navigator)
        .ownership(ownership)
        .feature_routers(fetcher, fetch_timeout)
        .build()
}

pub fn container(initial: RootId) -> RootModuleContainer {
    container_with(
        Arc::new(seeded_catalog()),
        initial,
        OwnershipMap::new(),
        Duration::from_secs(5),
    )
}

pub fn drain(rx: &mut tokio::sync::broadcast::Receiver<NavigationEvent>) -> Vec<NavigationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
