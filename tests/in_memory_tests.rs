//! Integration tests for InMemoryRepository using the shared fixtures.
//!
//! Invokes `repository_tests!` to validate that InMemoryRepository fully
//! conforms to the Repository<T> contract, then checks how the repository
//! feeds list pages and the event bus.

#[macro_use]
mod support;

use boi::prelude::*;
use std::sync::Arc;
use support::*;

repository_tests!(InMemoryRepository::<Buyer>::new());

// =============================================================================
// Repository -> list page
// =============================================================================

#[tokio::test]
async fn test_list_page_over_repository_snapshot() {
    init_tracing();
    let repo = InMemoryRepository::with_items(herd());
    let mut list = ListQuery::<Animal>::with_context(Animal::list_descriptor(), context());

    let ticket = list.begin_fetch();
    assert!(list.apply_fetch(ticket, repo.list().await.unwrap()));
    assert_eq!(list.results().len(), 5);

    // Unchanged repository: same snapshot, no recomputation
    let before = list.recomputations();
    let ticket = list.begin_fetch();
    assert!(list.apply_fetch(ticket, repo.list().await.unwrap()));
    list.results();
    assert_eq!(list.recomputations(), before);

    // A write produces a new snapshot
    let calf = Animal::new("BR-006", "Angus", Sex::Male, date(2024, 5, 1));
    repo.create(calf).await.unwrap();
    let ticket = list.begin_fetch();
    assert!(list.apply_fetch(ticket, repo.list().await.unwrap()));
    assert_eq!(list.results().len(), 6);
    assert_eq!(list.recomputations(), before + 1);
}

#[tokio::test]
async fn test_out_of_order_fetches_keep_the_latest() {
    let repo = InMemoryRepository::with_items(herd());
    let mut list = ListQuery::<Animal>::with_context(Animal::list_descriptor(), context());

    let slow = list.begin_fetch();
    let stale: Arc<[Animal]> = repo.list().await.unwrap();

    let animal = Animal::new("BR-007", "Nelore", Sex::Female, date(2023, 9, 9));
    repo.create(animal).await.unwrap();
    let fast = list.begin_fetch();

    assert!(list.apply_fetch(fast, repo.list().await.unwrap()));
    assert!(!list.apply_fetch(slow, stale));
    assert_eq!(list.results().len(), 6);
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn test_repository_events_reach_every_subscriber() {
    let bus = AppConfig::default().event_bus();
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();
    let repo = InMemoryRepository::<Buyer>::new().with_event_bus(bus.clone());

    let mut created = repo.create(buyer("Carlos Mendes")).await.unwrap();
    created.phone = "(62) 3222-1000".to_string();
    repo.update(&created.id, created.clone()).await.unwrap();

    for rx in [&mut first, &mut second] {
        let event = rx.recv().await.unwrap().event;
        assert_eq!(event.action(), "created");

        let event = rx.recv().await.unwrap().event;
        match event {
            EntityEvent::Updated { entity_id, data, .. } => {
                assert_eq!(entity_id, created.id);
                assert_eq!(data["phone"], "(62) 3222-1000");
            }
            other => panic!("expected an update, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_selection_store_notifies_subscribers() {
    let store = SelectionStore::new();
    let mut rx = store.subscribe();

    let fazenda = Property::new("FZ-01", "Fazenda Santa Luzia", "José", "Uberaba", "MG", 100.0);
    let selected = SelectedProperty {
        id: fazenda.id,
        name: fazenda.name.clone(),
    };

    // Another handle (e.g., another page) makes the change
    let other_handle = store.clone();
    tokio::spawn(async move {
        other_handle.select(selected);
    });

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().as_ref().map(|p| p.id), Some(fazenda.id));
    assert!(!store.select(SelectedProperty {
        id: fazenda.id,
        name: fazenda.name.clone(),
    }));
}

#[tokio::test]
async fn test_breadcrumbs_follow_navigation() {
    let trail = Breadcrumbs::new();
    let mut rx = trail.subscribe();

    trail.push(Breadcrumb::new("Início", "/"));
    trail.push(Breadcrumb::new("Animais", "/animals"));
    trail.push(Breadcrumb::new("BR-001", "/animals/br-001"));
    rx.changed().await.unwrap();

    trail.push(Breadcrumb::new("Animais", "/animals"));
    let labels: Vec<String> = trail.trail().into_iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["Início", "Animais"]);

    assert_eq!(trail.pop().map(|c| c.path), Some("/animals".to_string()));
    trail.clear();
    assert!(trail.trail().is_empty());
}
