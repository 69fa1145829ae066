//! Shipment records and the shipping lifecycle vocabulary.
//!
//! A shipment tracks an order's delivery independently of the order's
//! product commitment. Its status moves through a small state machine:
//!
//! ```text
//! CREATED ──► IN_PROGRESS ──► COMPLETED | FAILED
//! ```
//!
//! Statuses and shipping types carry stable wire strings (`as_str` /
//! `parse`) so stored records stay readable across backends.

use crate::catalog::Sku;
use crate::order::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a shipment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Creates a `ShipmentId` from an existing string
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

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of supported shipping types.
///
/// Validation is case- and value-exact against the wire labels — no
/// normalization is applied to caller input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingType {
    /// Regular parcel delivery
    Standard,
    /// Expedited delivery
    Express,
    /// Next-morning delivery
    Overnight,
}

impl ShippingType {
    /// All supported types, in the order they are advertised
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Overnight];

    /// The stable wire label for this type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    /// The advertised labels, in order
    #[must_use]
    pub const fn labels() -> [&'static str; 3] {
        [
            Self::Standard.as_str(),
            Self::Express.as_str(),
            Self::Overnight.as_str(),
        ]
    }

    /// Parses a wire label, exactly; returns `None` for anything else
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == label)
    }
}

impl fmt::Display for ShippingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingStatus {
    /// Record persisted, not yet announced
    Created,
    /// Announced and underway
    InProgress,
    /// Arrived within its due date
    Completed,
    /// Missed its due date
    Failed,
}

impl ShippingStatus {
    /// The stable wire string for this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    /// Parses a wire string, exactly; returns `None` for anything else
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATED" => Some(Self::Created),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    /// True for statuses not expected to change further
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The persisted form of a shipment, keyed by [`ShipmentId`].
///
/// Timestamps are UTC and serialize as ISO-8601. `product_ids` keeps the
/// order the cart committed them in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Shipment identity
    pub shipping_id: ShipmentId,
    /// Validated shipping type
    pub shipping_type: ShippingType,
    /// The order this shipment belongs to
    pub order_id: OrderId,
    /// SKUs included, in commit order
    pub product_ids: Vec<Sku>,
    /// Current lifecycle status
    pub shipping_status: ShippingStatus,
    /// When the record was created
    pub created_date: DateTime<Utc>,
    /// Deadline for on-time delivery
    pub due_date: DateTime<Utc>,
}
