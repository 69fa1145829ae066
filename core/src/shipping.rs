//! Shipping coordinator: validates shipment requests, persists records,
//! announces them, and drives the delivery state machine.
//!
//! # Side-effect contract
//!
//! [`ShippingService::create`] performs exactly three side effects, in
//! this order:
//!
//! 1. store `put` of a `CREATED` record
//! 2. notifier `publish` of the new shipment id
//! 3. store `update_status` to `IN_PROGRESS`
//!
//! If step 1 fails the operation fails atomically — nothing is persisted
//! and nothing is published. If step 2 or 3 fails after a successful put,
//! the record is left in an intermediate state; the error surfaces to the
//! caller and is never retried here.
//!
//! # Time-driven transition
//!
//! [`ShippingService::process`] classifies a shipment against its due
//! date: on-time (inclusive boundary, `now ≤ due`) completes it, past due
//! fails it. The coordinator has no timer of its own — an external
//! trigger (scheduled worker, queue consumer) decides when to process.

use crate::catalog::Sku;
use crate::environment::Clock;
use crate::notifier::{NotifierError, ShippingNotifier};
use crate::order::OrderId;
use crate::shipment::{ShipmentId, ShipmentRecord, ShippingStatus, ShippingType};
use crate::store::{ShipmentStore, ShipmentStoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the shipping coordinator.
#[derive(Error, Debug)]
pub enum ShippingError {
    /// The requested shipping type is not in the supported set.
    #[error("shipping type is not available: '{0}'")]
    InvalidShippingType(String),

    /// The due date is not strictly in the future.
    #[error("due date {due_date} must be after current time {now}")]
    InvalidDueDate {
        /// The rejected due date
        due_date: DateTime<Utc>,
        /// The clock reading it was validated against
        now: DateTime<Utc>,
    },

    /// No shipment exists under the given id.
    #[error("shipment not found: {0}")]
    NotFound(ShipmentId),

    /// The shipment store failed.
    #[error(transparent)]
    Store(#[from] ShipmentStoreError),

    /// The shipping notifier failed.
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}

/// Injected collaborators for the shipping coordinator.
#[derive(Clone)]
pub struct ShippingEnvironment {
    /// Durable persistence for shipment records
    pub store: Arc<dyn ShipmentStore>,
    /// Queue announcing newly created shipments
    pub notifier: Arc<dyn ShippingNotifier>,
    /// Clock for validation and classification
    pub clock: Arc<dyn Clock>,
}

impl ShippingEnvironment {
    /// Creates a new shipping environment
    #[must_use]
    pub fn new(
        store: Arc<dyn ShipmentStore>,
        notifier: Arc<dyn ShippingNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }
}

/// The shipping coordinator.
///
/// Stateless itself — every invocation reads and writes through the
/// injected store, so any number of service clones may serve concurrent
/// checkouts.
#[derive(Clone)]
pub struct ShippingService {
    env: ShippingEnvironment,
}

impl ShippingService {
    /// Creates a coordinator over the given environment
    #[must_use]
    pub const fn new(env: ShippingEnvironment) -> Self {
        Self { env }
    }

    /// The fixed, ordered set of valid shipping-type labels.
    ///
    /// Deterministic, no I/O.
    #[must_use]
    pub const fn available_types() -> [&'static str; 3] {
        ShippingType::labels()
    }

    /// Current clock reading, for callers composing due dates.
    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.env.clock.now()
    }

    /// Creates a shipment: validate, persist, announce, mark in progress.
    ///
    /// Returns the generated shipment id. See the module docs for the
    /// exact side-effect ordering and the accepted intermediate-state
    /// hazard.
    ///
    /// # Errors
    ///
    /// - [`ShippingError::InvalidShippingType`] if `shipping_type` is not
    ///   an exact match for a supported label (no store write, no publish)
    /// - [`ShippingError::InvalidDueDate`] if `due_date` is not strictly
    ///   after the current time (no store write, no publish)
    /// - [`ShippingError::Store`] / [`ShippingError::Notifier`] if a
    ///   collaborator fails
    pub async fn create(
        &self,
        shipping_type: &str,
        product_ids: Vec<Sku>,
        order_id: OrderId,
        due_date: DateTime<Utc>,
    ) -> Result<ShipmentId, ShippingError> {
        let Some(shipping_type) = ShippingType::parse(shipping_type) else {
            tracing::warn!(shipping_type, "rejected shipment with unknown shipping type");
            return Err(ShippingError::InvalidShippingType(shipping_type.to_string()));
        };

        let now = self.env.clock.now();
        if due_date <= now {
            tracing::warn!(%due_date, %now, "rejected shipment with non-future due date");
            return Err(ShippingError::InvalidDueDate { due_date, now });
        }

        let shipping_id = ShipmentId::generate();
        let record = ShipmentRecord {
            shipping_id: shipping_id.clone(),
            shipping_type,
            order_id,
            product_ids,
            shipping_status: ShippingStatus::Created,
            created_date: now,
            due_date,
        };

        self.env.store.put(record).await?;
        self.env.notifier.publish(&shipping_id).await?;
        self.env
            .store
            .update_status(&shipping_id, ShippingStatus::InProgress)
            .await?;

        tracing::info!(
            shipment_id = %shipping_id,
            shipping_type = %shipping_type,
            "shipment created and announced"
        );
        Ok(shipping_id)
    }

    /// Reads the current status of a shipment.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NotFound`] for an unknown id,
    /// [`ShippingError::Store`] if the read fails.
    pub async fn check_status(
        &self,
        shipping_id: &ShipmentId,
    ) -> Result<ShippingStatus, ShippingError> {
        let record = self
            .env
            .store
            .get(shipping_id)
            .await?
            .ok_or_else(|| ShippingError::NotFound(shipping_id.clone()))?;
        Ok(record.shipping_status)
    }

    /// The time-driven transition: classifies the shipment against its
    /// due date and writes the resulting terminal status.
    ///
    /// A due date at or after the current time counts as on-time
    /// (`COMPLETED`); past due fails the shipment. The classification is
    /// recomputed from the due date on every call — there is no
    /// terminal-state guard, so a later trigger observes a later "now".
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NotFound`] for an unknown id,
    /// [`ShippingError::Store`] if the read or write fails.
    pub async fn process(
        &self,
        shipping_id: &ShipmentId,
    ) -> Result<ShippingStatus, ShippingError> {
        let record = self
            .env
            .store
            .get(shipping_id)
            .await?
            .ok_or_else(|| ShippingError::NotFound(shipping_id.clone()))?;

        let now = self.env.clock.now();
        let status = if now <= record.due_date {
            ShippingStatus::Completed
        } else {
            ShippingStatus::Failed
        };

        self.env.store.update_status(shipping_id, status).await?;

        tracing::info!(
            shipment_id = %shipping_id,
            status = %status,
            due_date = %record.due_date,
            "shipment processed"
        );
        Ok(status)
    }
}

/// Caller-side handle for tracking a created shipment.
///
/// Binds a shipment id to the coordinator that owns its record, so
/// downstream code can poll delivery status without carrying both around.
#[derive(Clone)]
pub struct Shipment {
    shipping_id: ShipmentId,
    shipping: ShippingService,
}

impl Shipment {
    /// Creates a tracking handle for an existing shipment
    #[must_use]
    pub const fn new(shipping_id: ShipmentId, shipping: ShippingService) -> Self {
        Self {
            shipping_id,
            shipping,
        }
    }

    /// The tracked shipment's identity
    #[must_use]
    pub const fn id(&self) -> &ShipmentId {
        &self.shipping_id
    }

    /// Reads the shipment's current status from the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NotFound`] if the record no longer
    /// exists, [`ShippingError::Store`] if the read fails.
    pub async fn status(&self) -> Result<ShippingStatus, ShippingError> {
        self.shipping.check_status(&self.shipping_id).await
    }
}
