//! Shipping notifier abstraction: one message per newly created shipment.
//!
//! The notifier is fire-and-forget from the core's perspective — delivery
//! guarantees (at-least-once, ordering, durability) are owned by the
//! implementation behind this trait. Implementations:
//!
//! - `RedpandaShippingNotifier` (in `storefront-redpanda`): Kafka-compatible topic
//! - `RecordingNotifier` (in `storefront-testing`): captures published ids
//!
//! # Dyn Compatibility
//!
//! Explicit `Pin<Box<dyn Future>>` returns keep the trait usable as
//! `Arc<dyn ShippingNotifier>` inside the shipping environment.

use crate::shipment::ShipmentId;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur while announcing a shipment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// Failed to reach the broker at all.
    #[error("notifier connection failed: {0}")]
    ConnectionFailed(String),

    /// The broker rejected or dropped the publish.
    #[error("publish failed for shipment '{shipment_id}': {reason}")]
    PublishFailed {
        /// The shipment whose announcement failed
        shipment_id: ShipmentId,
        /// The reason for failure
        reason: String,
    },
}

/// Queue/broker interface announcing newly created shipments.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
pub trait ShippingNotifier: Send + Sync {
    /// Enqueue the shipment id as a message payload.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] if the message could not be handed to the
    /// broker. The core performs no retry; callers own backoff policy.
    fn publish(
        &self,
        shipment_id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotifierError>> + Send + '_>>;
}
