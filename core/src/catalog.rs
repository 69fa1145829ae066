//! Product catalog: SKU identity, priced inventory entries, atomic stock.
//!
//! A [`Product`] is identified by an explicit [`Sku`] key rather than by
//! overridden equality on a display name; the [`Catalog`] is a map keyed by
//! that identity. Stock lives in an `AtomicU32` so the non-negative
//! invariant holds under concurrently committing carts: [`Product::purchase`]
//! is a compare-and-decrement that re-validates availability at the moment
//! it applies.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Errors raised by the cart commit protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Requested amount was zero; reservations must be positive.
    #[error("amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: u32,
    },

    /// Not enough stock to satisfy the requested amount.
    ///
    /// Raised optimistically at add-time and authoritatively at commit
    /// time — stock may have been drained by concurrent carts in between.
    #[error("product {sku} has only {available} items, requested {requested}")]
    InsufficientStock {
        /// The product that ran short
        sku: Sku,
        /// Total quantity that was requested
        requested: u32,
        /// Quantity actually available when the check ran
        available: u32,
    },
}

/// Unique catalog identity for a product.
///
/// Case-sensitive and unique within a catalog. Two products are the same
/// product iff their SKUs are equal; price and stock play no part in
/// identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sku(String);

impl Sku {
    /// Creates a new `Sku`
    #[must_use]
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An inventory-backed catalog entry.
///
/// Created by catalog setup, mutated only via [`Product::purchase`], never
/// deleted by the core. Shared across carts as `Arc<Product>` so that
/// concurrent checkouts contend on a single stock counter.
#[derive(Debug)]
pub struct Product {
    sku: Sku,
    price: Money,
    stock: AtomicU32,
}

impl Product {
    /// Creates a new product with an initial stock level
    #[must_use]
    pub const fn new(sku: Sku, price: Money, stock: u32) -> Self {
        Self {
            sku,
            price,
            stock: AtomicU32::new(stock),
        }
    }

    /// The product's catalog identity
    #[must_use]
    pub const fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Price per unit
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Currently available quantity
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock.load(Ordering::Acquire)
    }

    /// True iff `requested` units are currently available
    #[must_use]
    pub fn is_available(&self, requested: u32) -> bool {
        requested <= self.stock()
    }

    /// Atomically decrements stock by `requested` units.
    ///
    /// Availability is re-validated at the instant the decrement applies
    /// (compare-and-swap loop), so stock never goes negative even when
    /// multiple carts commit against the same product concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientStock`] if fewer than
    /// `requested` units remain at decrement time.
    pub fn purchase(&self, requested: u32) -> Result<(), InventoryError> {
        self.stock
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_sub(requested)
            })
            .map(|_| ())
            .map_err(|available| InventoryError::InsufficientStock {
                sku: self.sku.clone(),
                requested,
                available,
            })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sku)
    }
}

/// Catalog of products keyed by SKU.
///
/// Setup-time only as far as the core is concerned: the checkout flow
/// reads products out of the catalog and mutates their stock, but never
/// adds or removes entries.
#[derive(Debug, Default)]
pub struct Catalog {
    products: HashMap<Sku, Arc<Product>>,
}

impl Catalog {
    /// Creates an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, returning the shared handle.
    ///
    /// Replaces any previous entry with the same SKU.
    pub fn insert(&mut self, product: Product) -> Arc<Product> {
        let handle = Arc::new(product);
        self.products
            .insert(handle.sku().clone(), Arc::clone(&handle));
        handle
    }

    /// Looks up a product by SKU
    #[must_use]
    pub fn get(&self, sku: &Sku) -> Option<Arc<Product>> {
        self.products.get(sku).cloned()
    }

    /// Number of catalog entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True iff the catalog has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)] // Test code uses expect for clear failure messages

    use super::*;
    use proptest::prelude::*;

    fn book() -> Product {
        Product::new(Sku::new("book"), Money::from_dollars(10), 5)
    }

    #[test]
    fn is_available_true_when_enough() {
        let product = book();
        assert!(product.is_available(5));
        assert!(product.is_available(1));
    }

    #[test]
    fn is_available_false_when_not_enough() {
        assert!(!book().is_available(6));
    }

    #[test]
    fn purchase_decrements_stock() {
        let product = book();
        product.purchase(3).expect("enough stock");
        assert_eq!(product.stock(), 2);
    }

    #[test]
    fn purchase_rejects_overdraw_and_leaves_stock_unchanged() {
        let product = book();
        let err = product.purchase(999).expect_err("not enough stock");
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                sku: Sku::new("book"),
                requested: 999,
                available: 5,
            }
        );
        assert_eq!(product.stock(), 5);
    }

    #[test]
    fn concurrent_purchases_never_oversell() {
        let product = Arc::new(Product::new(Sku::new("book"), Money::from_dollars(10), 10));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let product = Arc::clone(&product);
                std::thread::spawn(move || product.purchase(2).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|ok| *ok)
            .count();

        // 10 units admit exactly five 2-unit purchases
        assert_eq!(successes, 5);
        assert_eq!(product.stock(), 0);
    }

    #[test]
    fn catalog_lookup_by_sku() {
        let mut catalog = Catalog::new();
        catalog.insert(book());
        assert!(catalog.get(&Sku::new("book")).is_some());
        assert!(catalog.get(&Sku::new("missing")).is_none());
        assert_eq!(catalog.len(), 1);
    }

    proptest! {
        #[test]
        fn availability_matches_stock(stock in 0u32..1000, requested in 0u32..1000) {
            let product = Product::new(Sku::new("p"), Money::from_cents(100), stock);
            prop_assert_eq!(product.is_available(requested), requested <= stock);
        }
    }
}
