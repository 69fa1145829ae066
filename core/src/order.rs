//! Order orchestration: one checkout attempt binding a cart to the
//! shipping coordinator.
//!
//! Placing an order commits the cart (authoritative stock decrements) and
//! then requests shipment creation with the purchased SKUs. There is no
//! compensating action if shipment creation fails after the commit
//! succeeded — stock is already decremented with no shipment record. That
//! hazard is part of the contract; layers that need compensation build it
//! above this one.

use crate::cart::Cart;
use crate::catalog::InventoryError;
use crate::shipment::ShipmentId;
use crate::shipping::{ShippingError, ShippingService};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an `OrderId` from an existing string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order-level configuration.
///
/// The default due-date offset is an explicit parameter rather than a
/// process-wide constant. The 3-second default is sized for demonstration
/// and tests, not a production SLA — deployments should configure it.
#[derive(Clone, Copy, Debug)]
pub struct OrderConfig {
    /// Offset added to "now" when the caller supplies no due date
    pub default_due_offset: Duration,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            default_due_offset: Duration::seconds(3),
        }
    }
}

/// Errors raised while placing an order.
#[derive(Error, Debug)]
pub enum OrderError {
    /// The cart commit failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Shipment creation failed.
    ///
    /// When this arrives after a successful commit, stock has already
    /// been decremented with no shipment created.
    #[error(transparent)]
    Shipping(#[from] ShippingError),
}

/// A single checkout attempt.
///
/// Single semantic use: [`Order::place`] should be called at most once
/// per checkout. Placing again re-commits the already-emptied cart, which
/// is a no-op yielding zero products — a documented edge case, not an
/// error.
pub struct Order {
    order_id: OrderId,
    cart: Cart,
    shipping: ShippingService,
    config: OrderConfig,
}

impl Order {
    /// Creates an order with a generated id and default configuration
    #[must_use]
    pub fn new(cart: Cart, shipping: ShippingService) -> Self {
        Self {
            order_id: OrderId::generate(),
            cart,
            shipping,
            config: OrderConfig::default(),
        }
    }

    /// Overrides the generated order id
    #[must_use]
    pub fn with_order_id(mut self, order_id: OrderId) -> Self {
        self.order_id = order_id;
        self
    }

    /// Overrides the default configuration
    #[must_use]
    pub const fn with_config(mut self, config: OrderConfig) -> Self {
        self.config = config;
        self
    }

    /// This order's identity
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The cart held by this order
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Commits the cart and requests shipment creation.
    ///
    /// When `due_date` is `None`, the deadline defaults to the current
    /// time plus [`OrderConfig::default_due_offset`]. Returns the created
    /// shipment id.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Inventory`] if the commit fails (see
    ///   [`Cart::commit`] for the partial-failure contract)
    /// - [`OrderError::Shipping`] if shipment creation fails; the commit
    ///   is not compensated
    pub async fn place(
        &mut self,
        shipping_type: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<ShipmentId, OrderError> {
        let due_date =
            due_date.unwrap_or_else(|| self.shipping.now() + self.config.default_due_offset);

        let product_ids = self.cart.commit()?;
        tracing::info!(
            order_id = %self.order_id,
            products = product_ids.len(),
            "cart committed, requesting shipment"
        );

        let shipment_id = self
            .shipping
            .create(shipping_type, product_ids, self.order_id.clone(), due_date)
            .await?;
        Ok(shipment_id)
    }
}
