//! Integration tests for the view event stream

use order_view::prelude::*;
use tokio::sync::broadcast::error::TryRecvError;

fn seeded_view(bus: &ViewEventBus) -> OrderView {
    let orders = (1..=15)
        .map(|i| {
            Order::new(
                format!("ORD-{:02}", i),
                format!("Customer {}", i),
                "addr",
                format!("2024-04-{:02}", i),
                format!("${}", i),
                if i % 2 == 0 {
                    OrderStatus::Completed
                } else {
                    OrderStatus::Pending
                },
            )
        })
        .collect::<Vec<_>>();
    let store = InMemoryOrderStore::from_records(orders).unwrap();
    OrderView::new(store, ViewConfig::default()).with_event_bus(bus.clone())
}

#[tokio::test]
async fn test_filter_change_publishes_single_state_with_page_reset() {
    let bus = ViewEventBus::new(16);
    let mut view = seeded_view(&bus);
    view.dispatch(ViewAction::NextClicked);

    let mut rx = bus.subscribe();
    view.dispatch(ViewAction::StatusSelected {
        status: StatusFilter::Only(OrderStatus::Completed),
    });

    let envelope = rx.recv().await.unwrap();
    match envelope.event {
        ViewEvent::StateChanged {
            page,
            page_count,
            result_count,
            filter,
            ..
        } => {
            assert_eq!(page, 1);
            assert_eq!(page_count, 1);
            assert_eq!(result_count, 7);
            assert_eq!(filter.status, StatusFilter::Only(OrderStatus::Completed));
        }
        other => panic!("unexpected event {:?}", other),
    }

    // The filter change and the page reset are one transition
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_confirmed_removal_publishes_removed_then_state() {
    let bus = ViewEventBus::new(16);
    let mut view = seeded_view(&bus);
    let mut rx = bus.subscribe();

    view.request_removal("ORD-03", &AutoConfirm(true));

    let first = rx.recv().await.unwrap();
    assert_eq!(
        first.event,
        ViewEvent::OrderRemoved {
            id: "ORD-03".to_string()
        }
    );

    let second = rx.recv().await.unwrap();
    assert!(second.sequence > first.sequence);
    match second.event {
        ViewEvent::StateChanged { result_count, .. } => assert_eq!(result_count, 14),
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_declined_removal_publishes_only_declined() {
    let bus = ViewEventBus::new(16);
    let mut view = seeded_view(&bus);
    let mut rx = bus.subscribe();

    view.request_removal("ORD-03", &AutoConfirm(false));

    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.event.event_kind(), "removal_declined");
    assert_eq!(envelope.event.order_id(), Some("ORD-03"));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_removing_unknown_id_publishes_nothing() {
    let bus = ViewEventBus::new(16);
    let mut view = seeded_view(&bus);
    let mut rx = bus.subscribe();

    assert!(!view.remove_by_id("ORD-99"));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_view_without_bus_still_works() {
    let orders = vec![Order::new(
        "A",
        "Ann",
        "addr",
        "2024-01-01",
        "$1",
        OrderStatus::Pending,
    )];
    let store = InMemoryOrderStore::from_records(orders).unwrap();
    let mut view = OrderView::new(store, ViewConfig::default());
    let snapshot = view.dispatch(ViewAction::SearchChanged {
        text: "ann".to_string(),
    });
    assert_eq!(snapshot.result_count(), 1);
    assert_eq!(snapshot.page_count(), 1);
}
