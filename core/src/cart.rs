//! Shopping cart: provisional reservations and the commit protocol.
//!
//! Adding to a cart checks availability optimistically but decrements
//! nothing; [`Cart::commit`] is the authoritative step that converts every
//! reservation into an atomic stock decrement. The stock check runs twice:
//! concurrent shoppers may drain the same stock between "add to cart" and
//! "checkout", and only commit time decides.

use crate::catalog::{InventoryError, Product, Sku};
use crate::money::Money;
use std::sync::Arc;

/// A single reservation line: a product and the quantity held for it.
#[derive(Clone, Debug)]
struct CartLine {
    product: Arc<Product>,
    quantity: u32,
}

/// A collection of provisional product reservations.
///
/// Lines keep entry order, so [`Cart::commit`] returns purchased SKUs in
/// the order they were first added. Created empty per checkout session and
/// emptied exactly once by a successful commit.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// True iff the cart holds no reservations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True iff the cart holds a reservation for `sku`
    #[must_use]
    pub fn contains(&self, sku: &Sku) -> bool {
        self.lines.iter().any(|line| line.product.sku() == sku)
    }

    /// Quantity currently reserved for `sku` (zero if absent)
    #[must_use]
    pub fn quantity_of(&self, sku: &Sku) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product.sku() == sku)
            .map_or(0, |line| line.quantity)
    }

    /// Reserves `amount` units of `product`, summing with any existing
    /// reservation for the same SKU.
    ///
    /// The product's current availability is checked against the
    /// cumulative reservation, but stock is not mutated — the reservation
    /// stays provisional until [`Cart::commit`].
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidAmount`] if `amount` is zero
    /// - [`InventoryError::InsufficientStock`] if the cumulative
    ///   reservation would exceed what is currently available; the cart is
    ///   left unchanged
    pub fn add(&mut self, product: &Arc<Product>, amount: u32) -> Result<(), InventoryError> {
        if amount == 0 {
            return Err(InventoryError::InvalidAmount { amount });
        }

        let reserved = self.quantity_of(product.sku());
        let wanted = reserved + amount;
        if !product.is_available(wanted) {
            return Err(InventoryError::InsufficientStock {
                sku: product.sku().clone(),
                requested: wanted,
                available: product.stock(),
            });
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.product.sku() == product.sku())
        {
            Some(line) => line.quantity = wanted,
            None => self.lines.push(CartLine {
                product: Arc::clone(product),
                quantity: amount,
            }),
        }
        Ok(())
    }

    /// Drops the reservation for `sku` if present; no-op otherwise.
    pub fn remove(&mut self, sku: &Sku) {
        self.lines.retain(|line| line.product.sku() != sku);
    }

    /// Sum of price × quantity over all reservations; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .map(|line| line.product.price().times(line.quantity))
            .sum()
    }

    /// Converts every reservation into an authoritative stock decrement.
    ///
    /// Lines are purchased one by one in entry order; each purchase
    /// re-validates availability at commit time. On success the cart is
    /// emptied and the purchased SKUs are returned in entry order.
    /// Committing an already-emptied cart succeeds with an empty list.
    ///
    /// # Partial failure
    ///
    /// There is no rollback: if a purchase fails partway through a
    /// multi-product commit, products already purchased in this call stay
    /// decremented and the cart keeps all of its lines. Callers that need
    /// stronger atomicity must compensate above this layer.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientStock`] from the first line
    /// whose stock no longer covers its reservation.
    pub fn commit(&mut self) -> Result<Vec<Sku>, InventoryError> {
        let mut purchased = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            line.product.purchase(line.quantity)?;
            purchased.push(line.product.sku().clone());
        }
        self.lines.clear();
        Ok(purchased)
    }
}
