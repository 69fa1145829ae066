//! # Storefront Testing
//!
//! Testing utilities for the Storefront checkout flow: in-memory
//! implementations of every collaborator the shipping coordinator is
//! injected with, plus small helpers for building test fixtures.
//!
//! The mocks record what happened to them — call counts, published ids,
//! stored records — and can be told to fail on demand, so tests can pin
//! down the coordinator's side-effect ordering and atomicity guarantees
//! without any real infrastructure.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_core::shipping::{ShippingEnvironment, ShippingService};
//! use storefront_testing::{InMemoryShipmentStore, RecordingNotifier, test_clock};
//!
//! let store = InMemoryShipmentStore::new();
//! let notifier = RecordingNotifier::new();
//! let service = ShippingService::new(ShippingEnvironment::new(
//!     Arc::new(store.clone()),
//!     Arc::new(notifier.clone()),
//!     Arc::new(test_clock()),
//! ));
//! ```

pub mod mocks;

pub use mocks::{
    FixedClock, InMemoryShipmentStore, RecordingNotifier, test_clock,
};

/// Test fixture helpers.
pub mod helpers {
    use std::sync::Arc;
    use storefront_core::catalog::{Product, Sku};
    use storefront_core::money::Money;
    use storefront_core::shipping::{ShippingEnvironment, ShippingService};

    use crate::mocks::{InMemoryShipmentStore, RecordingNotifier, test_clock};

    /// Builds a shared product handle for cart tests
    #[must_use]
    pub fn test_product(sku: &str, price_dollars: i64, stock: u32) -> Arc<Product> {
        Arc::new(Product::new(
            Sku::new(sku),
            Money::from_dollars(price_dollars),
            stock,
        ))
    }

    /// Builds a shipping service wired to fresh in-memory collaborators
    /// and the default fixed clock; returns the handles for assertions.
    #[must_use]
    pub fn test_shipping_service() -> (ShippingService, InMemoryShipmentStore, RecordingNotifier) {
        let store = InMemoryShipmentStore::new();
        let notifier = RecordingNotifier::new();
        let service = ShippingService::new(ShippingEnvironment::new(
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
            Arc::new(test_clock()),
        ));
        (service, store, notifier)
    }
}
