//! Concurrent dispatch behavior.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use deeplink_router::data::EntityKind;
use deeplink_router::deeplink::{EventFilter, EntityId};
use deeplink_router::navigation::{NavigationEvent, RootId, Screen};
use deeplink_router::routing::{DispatchReport, DispatchResult, OwnershipMap};
use deeplink_router::{RawDeepLinkPayload, RootModuleContainer};
use tokio::task::JoinHandle;

mod common;
use common::{container, container_with, drain, id, seeded_catalog, GatedFetcher};

fn spawn_dispatch(container: &RootModuleContainer, raw: &str) -> JoinHandle<DispatchReport> {
    let container = container.clone();
    let raw = RawDeepLinkPayload::url(raw);
    tokio::spawn(async move { container.dispatch_raw(raw).await.unwrap() })
}

fn restaurant_id(screen: &Screen) -> Option<EntityId> {
    match screen {
        Screen::RestaurantDetail(r) => Some(r.id),
        _ => None,
    }
}

#[tokio::test]
async fn test_last_completed_fetch_wins() {
    let (fetcher, mut started) = GatedFetcher::new(seeded_catalog());
    let container = container_with(
        Arc::new(fetcher.clone()),
        RootId::Home,
        OwnershipMap::new(),
        Duration::from_secs(5),
    );
    let home = container.navigator().root(RootId::Home).unwrap();

    let first = spawn_dispatch(&container, "app://restaurant/1");
    started.recv().await.unwrap();
    let second = spawn_dispatch(&container, "app://restaurant/2");
    started.recv().await.unwrap();

    // Second link resolves first, the first link lands on top of it.
    fetcher.release(EntityKind::Restaurant, id(2));
    assert_eq!(second.await.unwrap().result, DispatchResult::Presented);
    fetcher.release(EntityKind::Restaurant, id(1));
    assert_eq!(first.await.unwrap().result, DispatchResult::Presented);

    let stack = home.snapshot().stack;
    let ids: Vec<_> = stack.iter().filter_map(restaurant_id).collect();
    assert_eq!(ids, vec![id(2), id(1)]);
}

#[tokio::test]
async fn test_slow_link_finishing_last_becomes_visible() {
    let (fetcher, mut started) = GatedFetcher::new(seeded_catalog());
    let container = container_with(
        Arc::new(fetcher.clone()),
        RootId::Events,
        OwnershipMap::new(),
        Duration::from_secs(5),
    );
    let mut rx = container.navigator().subscribe();

    let restaurant = spawn_dispatch(&container, "app://restaurant/42");
    started.recv().await.unwrap();
    // Nothing is shown while the fetch is pending.
    assert_eq!(container.navigator().active(), RootId::Events);

    let bookings = spawn_dispatch(&container, "app://bookings").await.unwrap();
    assert!(bookings.activated);
    assert_eq!(container.navigator().active(), RootId::Profile);

    fetcher.release(EntityKind::Restaurant, id(42));
    let restaurant = restaurant.await.unwrap();
    assert_eq!(restaurant.result, DispatchResult::Presented);
    assert!(restaurant.activated);

    let snapshot = container.navigator().snapshot();
    assert_eq!(snapshot.active, RootId::Home);
    let home = snapshot.root(RootId::Home).unwrap();
    assert_eq!(home.stack.last().and_then(restaurant_id), Some(id(42)));

    let activations: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, NavigationEvent::Activated { .. }))
        .collect();
    assert_eq!(
        activations,
        vec![
            NavigationEvent::Activated { root: RootId::Profile, previous: RootId::Events },
            NavigationEvent::Activated { root: RootId::Home, previous: RootId::Profile },
        ]
    );
}

#[tokio::test]
async fn test_late_fetch_error_shows_on_visible_root() {
    let (fetcher, mut started) = GatedFetcher::new(seeded_catalog());
    let container = container_with(
        Arc::new(fetcher.clone()),
        RootId::Home,
        OwnershipMap::new(),
        Duration::from_secs(5),
    );

    let missing = spawn_dispatch(&container, "app://restaurant/99");
    started.recv().await.unwrap();
    let promo = spawn_dispatch(&container, "app://promo").await.unwrap();
    assert!(promo.activated);

    fetcher.release(EntityKind::Restaurant, id(99));
    let missing = missing.await.unwrap();
    assert!(matches!(missing.result, DispatchResult::ErrorSurfaced(_)));
    assert!(missing.activated);

    let snapshot = container.navigator().snapshot();
    assert_eq!(snapshot.active, RootId::Home);
    assert_eq!(snapshot.root(RootId::Home).unwrap().alerts.len(), 1);
    assert!(snapshot.root(RootId::Profile).unwrap().alerts.is_empty());
}

#[tokio::test]
async fn test_list_link_invalidates_pending_detail() {
    let (fetcher, mut started) = GatedFetcher::new(seeded_catalog());
    let container = container_with(
        Arc::new(fetcher.clone()),
        RootId::Events,
        OwnershipMap::new(),
        Duration::from_secs(5),
    );
    let events_root = container.navigator().root(RootId::Events).unwrap();

    container.handle_deep_link(RawDeepLinkPayload::url("app://events")).await;
    let detail = spawn_dispatch(&container, "app://event/5");
    started.recv().await.unwrap();

    // Resets the stack, tearing down the list that owns the pending detail.
    let list = spawn_dispatch(&container, "app://events?tag=2").await.unwrap();
    assert_eq!(list.result, DispatchResult::Presented);

    fetcher.release(EntityKind::Event, id(5));
    assert_eq!(detail.await.unwrap().result, DispatchResult::Discarded);
    assert_eq!(
        events_root.snapshot().stack,
        vec![Screen::Events, Screen::EventList(EventFilter { tag: Some(id(2)) })]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_burst_keeps_stacks_consistent() {
    let container = container(RootId::Events);
    let mut rx = container.navigator().subscribe();

    let links = [
        "app://restaurant/1",
        "app://bookings",
        "app://restaurant/2",
        "app://promo?code=a1",
        "app://restaurant/42",
        "app://bookings",
        "app://promo",
    ];
    let handles: Vec<_> = (0..6)
        .flat_map(|_| links.iter())
        .map(|raw| spawn_dispatch(&container, raw))
        .collect();
    let reports: Vec<DispatchReport> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert!(reports.iter().all(|r| r.result == DispatchResult::Presented));

    let snapshot = container.navigator().snapshot();
    let home = snapshot.root(RootId::Home).unwrap();
    assert_eq!(home.stack[0], Screen::Home);
    assert_eq!(home.stack.iter().filter_map(restaurant_id).count(), 18);
    assert_eq!(home.stack.len(), 19);

    let profile = snapshot.root(RootId::Profile).unwrap();
    assert_eq!(profile.stack[0], Screen::Profile);
    assert!(profile.stack[1..].iter().all(|s| *s == Screen::BookingHistory));
    assert!(matches!(profile.modal, Some(Screen::PromoCode(_))));

    let activations = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, NavigationEvent::Activated { .. }))
        .count();
    let reported = reports.iter().filter(|r| r.activated).count();
    assert_eq!(activations, reported);
    assert!(activations <= reports.len());
}
