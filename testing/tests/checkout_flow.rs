//! Integration tests for the checkout flow: cart commit through shipment
//! creation, announcement, and time-driven processing, all against the
//! in-memory collaborators.

#![allow(clippy::expect_used)] // Test code uses expect for clear failure messages

use chrono::Duration;
use storefront_core::cart::Cart;
use storefront_core::catalog::{InventoryError, Sku};
use storefront_core::environment::Clock;
use storefront_core::order::{Order, OrderConfig, OrderError, OrderId};
use storefront_core::shipment::{ShipmentId, ShipmentRecord, ShippingStatus, ShippingType};
use storefront_core::shipping::{Shipment, ShippingError, ShippingService};
use storefront_core::store::ShipmentStore;
use storefront_testing::helpers::{test_product, test_shipping_service};
use storefront_testing::test_clock;

fn sku(s: &str) -> Sku {
    Sku::new(s)
}

/// Builds a record directly in the store, bypassing `create` — the way a
/// test seeds shipments whose due dates `create` would reject.
async fn seed_record(
    store: &storefront_testing::InMemoryShipmentStore,
    id: &str,
    status: ShippingStatus,
    due_offset: Duration,
) -> ShipmentId {
    let now = test_clock().now();
    let shipping_id = ShipmentId::new(id);
    store
        .put(ShipmentRecord {
            shipping_id: shipping_id.clone(),
            shipping_type: ShippingType::Standard,
            order_id: OrderId::new("order-seeded"),
            product_ids: vec![sku("book")],
            shipping_status: status,
            created_date: now,
            due_date: now + due_offset,
        })
        .await
        .expect("seed put succeeds");
    shipping_id
}

#[test]
fn available_types_are_fixed_and_ordered() {
    assert_eq!(
        ShippingService::available_types(),
        ["standard", "express", "overnight"]
    );
}

#[tokio::test]
async fn create_persists_announces_and_marks_in_progress() {
    let (service, store, notifier) = test_shipping_service();
    let due = test_clock().now() + Duration::minutes(1);

    let id = service
        .create("standard", vec![sku("book")], OrderId::new("order-1"), due)
        .await
        .expect("create succeeds");

    // Exactly one store write, one publish with the returned id, one
    // status update — in that order (ordering pinned by the failure
    // injection tests below).
    assert_eq!(store.put_count(), 1);
    assert_eq!(notifier.published(), vec![id.clone()]);
    assert_eq!(store.status_update_count(), 1);

    let record = store.record(&id).expect("record persisted");
    assert_eq!(record.shipping_id, id);
    assert_eq!(record.shipping_type, ShippingType::Standard);
    assert_eq!(record.order_id, OrderId::new("order-1"));
    assert_eq!(record.product_ids, vec![sku("book")]);
    assert_eq!(record.shipping_status, ShippingStatus::InProgress);
    assert_eq!(record.created_date, test_clock().now());
    assert_eq!(record.due_date, due);
}

#[tokio::test]
async fn create_rejects_unknown_type_with_no_side_effects() {
    let (service, store, notifier) = test_shipping_service();
    let due = test_clock().now() + Duration::minutes(1);

    let err = service
        .create("carrier pigeon", vec![sku("book")], OrderId::new("o"), due)
        .await
        .expect_err("unknown type rejected");

    assert!(matches!(err, ShippingError::InvalidShippingType(ref t) if t == "carrier pigeon"));
    assert!(store.is_empty());
    assert_eq!(notifier.publish_count(), 0);
}

#[tokio::test]
async fn create_type_validation_is_case_exact() {
    let (service, store, _notifier) = test_shipping_service();
    let due = test_clock().now() + Duration::minutes(1);

    let err = service
        .create("Standard", vec![sku("book")], OrderId::new("o"), due)
        .await
        .expect_err("no normalization of caller input");
    assert!(matches!(err, ShippingError::InvalidShippingType(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_rejects_past_due_date_with_no_side_effects() {
    let (service, store, notifier) = test_shipping_service();
    let due = test_clock().now() - Duration::seconds(1);

    let err = service
        .create("standard", vec![sku("book")], OrderId::new("o"), due)
        .await
        .expect_err("past due date rejected");

    assert!(matches!(err, ShippingError::InvalidDueDate { .. }));
    assert!(store.is_empty());
    assert_eq!(notifier.publish_count(), 0);
}

#[tokio::test]
async fn create_rejects_due_date_equal_to_now() {
    // Strictly-future requirement: due == now is not acceptable at
    // creation time, even though process() treats due == now as on-time.
    let (service, store, _notifier) = test_shipping_service();

    let err = service
        .create("standard", vec![sku("book")], OrderId::new("o"), test_clock().now())
        .await
        .expect_err("due date must be strictly in the future");
    assert!(matches!(err, ShippingError::InvalidDueDate { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_aborts_atomically_when_put_fails() {
    let (service, store, notifier) = test_shipping_service();
    store.fail_puts(true);

    let err = service
        .create(
            "standard",
            vec![sku("book")],
            OrderId::new("o"),
            test_clock().now() + Duration::minutes(1),
        )
        .await
        .expect_err("put failure propagates");

    assert!(matches!(err, ShippingError::Store(_)));
    assert!(store.is_empty(), "nothing persisted");
    assert_eq!(notifier.publish_count(), 0, "nothing published");
}

#[tokio::test]
async fn publish_failure_leaves_created_record_without_status_update() {
    // The accepted intermediate-state hazard: put succeeded, publish
    // failed, so the record stays CREATED and no update runs. This also
    // pins the side-effect order (put before publish before update).
    let (service, store, notifier) = test_shipping_service();
    notifier.fail_publishes(true);

    let err = service
        .create(
            "express",
            vec![sku("book")],
            OrderId::new("o"),
            test_clock().now() + Duration::minutes(1),
        )
        .await
        .expect_err("publish failure propagates");

    assert!(matches!(err, ShippingError::Notifier(_)));
    assert_eq!(store.put_count(), 1, "record was persisted before publish");
    assert_eq!(store.len(), 1);
    assert_eq!(store.status_update_count(), 0, "update never ran");

    let records: Vec<_> = notifier.published();
    assert!(records.is_empty());
}

#[tokio::test]
async fn status_update_failure_leaves_created_record_after_publish() {
    let (service, store, notifier) = test_shipping_service();
    store.fail_status_updates(true);

    let err = service
        .create(
            "standard",
            vec![sku("book")],
            OrderId::new("o"),
            test_clock().now() + Duration::minutes(1),
        )
        .await
        .expect_err("update failure propagates");

    assert!(matches!(err, ShippingError::Store(_)));
    assert_eq!(store.put_count(), 1);
    assert_eq!(notifier.publish_count(), 1, "publish ran before the update");

    let id = &notifier.published()[0];
    let record = store.record(id).expect("record persisted");
    assert_eq!(record.shipping_status, ShippingStatus::Created);
}

#[tokio::test]
async fn check_status_unknown_id_is_not_found() {
    let (service, _store, _notifier) = test_shipping_service();
    let err = service
        .check_status(&ShipmentId::new("missing"))
        .await
        .expect_err("unknown id");
    assert!(matches!(err, ShippingError::NotFound(_)));
}

#[tokio::test]
async fn process_unknown_id_is_not_found() {
    let (service, _store, _notifier) = test_shipping_service();
    let err = service
        .process(&ShipmentId::new("missing"))
        .await
        .expect_err("unknown id");
    assert!(matches!(err, ShippingError::NotFound(_)));
}

#[tokio::test]
async fn process_completes_shipment_before_due_date() {
    let (service, store, _notifier) = test_shipping_service();

    let id = service
        .create(
            "standard",
            vec![sku("book")],
            OrderId::new("o"),
            test_clock().now() + Duration::seconds(60),
        )
        .await
        .expect("create succeeds");

    let status = service.process(&id).await.expect("process succeeds");
    assert_eq!(status, ShippingStatus::Completed);
    assert_eq!(
        service.check_status(&id).await.expect("status readable"),
        ShippingStatus::Completed
    );
    assert_eq!(
        store.record(&id).expect("record present").shipping_status,
        ShippingStatus::Completed
    );
}

#[tokio::test]
async fn process_fails_shipment_past_due_date() {
    let (service, store, _notifier) = test_shipping_service();
    let id = seed_record(
        &store,
        "ship-late",
        ShippingStatus::InProgress,
        Duration::seconds(-1),
    )
    .await;

    let status = service.process(&id).await.expect("process succeeds");
    assert_eq!(status, ShippingStatus::Failed);
    assert_eq!(
        service.check_status(&id).await.expect("status readable"),
        ShippingStatus::Failed
    );
}

#[tokio::test]
async fn process_treats_due_date_equal_to_now_as_on_time() {
    // Inclusive boundary: now ≤ due, not now < due.
    let (service, store, _notifier) = test_shipping_service();
    let id = seed_record(
        &store,
        "ship-boundary",
        ShippingStatus::InProgress,
        Duration::zero(),
    )
    .await;

    let status = service.process(&id).await.expect("process succeeds");
    assert_eq!(status, ShippingStatus::Completed);
}

#[tokio::test]
async fn process_recomputes_terminal_states() {
    // No terminal-state guard: a completed shipment processed again is
    // reclassified against the due date every call.
    let (service, store, _notifier) = test_shipping_service();
    let id = seed_record(
        &store,
        "ship-terminal",
        ShippingStatus::Completed,
        Duration::seconds(30),
    )
    .await;

    let status = service.process(&id).await.expect("process succeeds");
    assert_eq!(status, ShippingStatus::Completed);
    let again = service.process(&id).await.expect("second process succeeds");
    assert_eq!(again, ShippingStatus::Completed);
}

#[tokio::test]
async fn shipment_handle_tracks_status_changes() {
    let (service, _store, _notifier) = test_shipping_service();

    let id = service
        .create(
            "standard",
            vec![sku("book")],
            OrderId::new("o"),
            test_clock().now() + Duration::minutes(1),
        )
        .await
        .expect("create succeeds");

    let shipment = Shipment::new(id.clone(), service.clone());
    assert_eq!(shipment.id(), &id);
    assert_eq!(
        shipment.status().await.expect("status readable"),
        ShippingStatus::InProgress
    );

    service.process(&id).await.expect("process succeeds");
    assert_eq!(
        shipment.status().await.expect("status readable"),
        ShippingStatus::Completed
    );
}

#[tokio::test]
async fn place_order_commits_cart_and_creates_shipment() {
    // "Book", price 10.0, stock 5, end to end.
    let (service, store, notifier) = test_shipping_service();
    let book = test_product("book", 10, 5);

    let mut cart = Cart::new();
    cart.add(&book, 5).expect("stock available");

    let mut order = Order::new(cart, service).with_order_id(OrderId::new("order-42"));
    let due = test_clock().now() + Duration::seconds(10);
    let id = order
        .place("standard", Some(due))
        .await
        .expect("order placed");

    assert_eq!(book.stock(), 0);
    assert_eq!(notifier.published(), vec![id.clone()]);

    let record = store.record(&id).expect("record persisted");
    assert_eq!(record.order_id, OrderId::new("order-42"));
    assert_eq!(record.product_ids, vec![sku("book")]);
    assert_eq!(record.shipping_status, ShippingStatus::InProgress);
    assert_eq!(record.due_date, due);
}

#[tokio::test]
async fn place_order_defaults_due_date_from_config() {
    let (service, store, _notifier) = test_shipping_service();
    let book = test_product("book", 10, 5);

    let mut cart = Cart::new();
    cart.add(&book, 1).expect("stock available");

    let mut order = Order::new(cart, service).with_config(OrderConfig {
        default_due_offset: Duration::seconds(30),
    });
    let id = order.place("overnight", None).await.expect("order placed");

    let record = store.record(&id).expect("record persisted");
    assert_eq!(record.due_date, test_clock().now() + Duration::seconds(30));
}

#[tokio::test]
async fn placing_twice_recommits_an_empty_cart() {
    // Documented edge case: the second place is a no-op commit yielding
    // zero products, not a crash.
    let (service, store, _notifier) = test_shipping_service();
    let book = test_product("book", 10, 5);

    let mut cart = Cart::new();
    cart.add(&book, 2).expect("stock available");

    let mut order = Order::new(cart, service);
    let due = test_clock().now() + Duration::minutes(1);
    let first = order.place("standard", Some(due)).await.expect("first place");
    let second = order.place("standard", Some(due)).await.expect("second place");

    assert_ne!(first, second);
    assert_eq!(book.stock(), 3, "stock decremented only once");
    let record = store.record(&second).expect("second record persisted");
    assert!(record.product_ids.is_empty());
}

#[tokio::test]
async fn place_order_propagates_commit_failure_without_shipping() {
    let (service, store, notifier) = test_shipping_service();
    let book = test_product("book", 10, 5);

    let mut cart = Cart::new();
    cart.add(&book, 5).expect("stock available at add time");

    // Stock drained between add and place.
    book.purchase(1).expect("concurrent purchase");

    let mut order = Order::new(cart, service);
    let err = order
        .place("standard", None)
        .await
        .expect_err("commit fails");

    assert!(matches!(
        err,
        OrderError::Inventory(InventoryError::InsufficientStock { .. })
    ));
    assert!(store.is_empty(), "no shipment was requested");
    assert_eq!(notifier.publish_count(), 0);
}

#[tokio::test]
async fn place_order_has_no_compensation_when_create_fails() {
    // The documented hazard: commit succeeded, shipment creation failed,
    // stock stays decremented and no record exists.
    let (service, store, notifier) = test_shipping_service();
    let book = test_product("book", 10, 5);

    let mut cart = Cart::new();
    cart.add(&book, 2).expect("stock available");

    let mut order = Order::new(cart, service);
    let err = order
        .place("carrier pigeon", None)
        .await
        .expect_err("create rejects the type");

    assert!(matches!(
        err,
        OrderError::Shipping(ShippingError::InvalidShippingType(_))
    ));
    assert_eq!(book.stock(), 3, "commit is not rolled back");
    assert!(store.is_empty());
    assert_eq!(notifier.publish_count(), 0);
}
