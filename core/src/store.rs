//! Shipment store abstraction: durable key-value persistence for
//! shipment records, keyed by shipment id.
//!
//! The core never provisions tables or queues — it only consumes this
//! narrow interface. Implementations:
//!
//! - `PostgresShipmentStore` (in `storefront-postgres`): production storage
//! - `InMemoryShipmentStore` (in `storefront-testing`): fast, deterministic tests
//!
//! # Dyn Compatibility
//!
//! This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn ShipmentStore>`),
//! which is how the shipping environment carries its collaborators.

use crate::shipment::{ShipmentId, ShipmentRecord, ShippingStatus};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during shipment store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShipmentStoreError {
    /// No record exists under the given id.
    #[error("shipment not found: {0}")]
    NotFound(ShipmentId),

    /// The backing store failed (connectivity, I/O, query error).
    ///
    /// The core does not distinguish transient from permanent
    /// infrastructure failures and performs no retries.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A record could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(String),
}

/// Durable key-value persistence for shipment records.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the shipping coordinator shares
/// them across concurrent checkout invocations.
pub trait ShipmentStore: Send + Sync {
    /// Create-or-replace the record under its shipment id.
    ///
    /// # Errors
    ///
    /// Returns [`ShipmentStoreError::Backend`] or
    /// [`ShipmentStoreError::Serialization`] if the write fails; a failed
    /// put persists nothing.
    fn put(
        &self,
        record: ShipmentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>>;

    /// Fetch the record under `id`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ShipmentStoreError::Backend`] or
    /// [`ShipmentStoreError::Serialization`] if the read fails. Absence is
    /// not an error at this layer.
    fn get(
        &self,
        id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ShipmentRecord>, ShipmentStoreError>> + Send + '_>>;

    /// Overwrite the status of the record under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ShipmentStoreError::NotFound`] if no record exists under
    /// `id`, [`ShipmentStoreError::Backend`] if the write fails.
    fn update_status(
        &self,
        id: &ShipmentId,
        status: ShippingStatus,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>>;
}
