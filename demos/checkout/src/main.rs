//! Checkout flow demo.
//!
//! Drives the full flow against in-memory collaborators: catalog setup,
//! cart reservations, order placement (commit + shipment creation +
//! announcement), and the time-driven processing transition.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin checkout-demo
//! ```

use std::sync::Arc;
use storefront_core::cart::Cart;
use storefront_core::catalog::{Catalog, Product, Sku};
use storefront_core::environment::SystemClock;
use storefront_core::money::Money;
use storefront_core::order::Order;
use storefront_core::shipping::{ShippingEnvironment, ShippingService};
use storefront_testing::{InMemoryShipmentStore, RecordingNotifier};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("=== Storefront Checkout Demo ===");

    // Catalog setup (out of scope for the core, owned by the caller)
    let mut catalog = Catalog::new();
    let book = catalog.insert(Product::new(Sku::new("book"), Money::from_dollars(10), 5));
    let lamp = catalog.insert(Product::new(Sku::new("lamp"), Money::from_dollars(45), 2));
    info!("catalog ready with {} products", catalog.len());

    // Fill a cart with provisional reservations
    let mut cart = Cart::new();
    cart.add(&book, 2)?;
    cart.add(&lamp, 1)?;
    info!("cart total: {}", cart.total());

    // Wire the shipping coordinator to in-memory collaborators
    let store = InMemoryShipmentStore::new();
    let notifier = RecordingNotifier::new();
    let shipping = ShippingService::new(ShippingEnvironment::new(
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
        Arc::new(SystemClock),
    ));

    // Place the order: commit the cart, create and announce the shipment
    let mut order = Order::new(cart, shipping.clone());
    let shipment_id = order.place("express", None).await?;
    info!("order {} placed, shipment {}", order.order_id(), shipment_id);
    info!(
        "stock after commit: book={}, lamp={}",
        book.stock(),
        lamp.stock()
    );
    info!("announced shipment ids: {:?}", notifier.published());

    // Show the persisted wire form
    if let Some(record) = store.record(&shipment_id) {
        info!("stored record:\n{}", serde_json::to_string_pretty(&record)?);
    }

    // Externally triggered transition: still inside the due window
    let status = shipping.process(&shipment_id).await?;
    info!("processed shipment {} -> {}", shipment_id, status);

    let status = shipping.check_status(&shipment_id).await?;
    info!("final status: {status}");

    Ok(())
}
