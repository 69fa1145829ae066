//! Redpanda shipping notifier implementation for Storefront.
//!
//! This crate provides a production-ready Kafka-compatible implementation
//! of the `ShippingNotifier` trait from `storefront-core`: every newly
//! created shipment id is published as a message to a configurable topic.
//!
//! # Why Redpanda?
//!
//! - **Kafka-compatible**: standard Kafka protocol, works with any
//!   Kafka-compatible broker (Redpanda, Apache Kafka, AWS MSK, ...)
//! - **Vendor swappable**: the consumer side (shipment processors,
//!   tracking dashboards) sees an ordinary topic
//! - **Simpler operations**: Redpanda is easier to deploy than Kafka
//!
//! # Delivery Semantics
//!
//! At-least-once from the broker's perspective: the notifier reports
//! success once the broker acknowledges the message. The checkout core
//! treats publishing as fire-and-forget and never retries — duplicate
//! shipment announcements must be tolerated by consumers.
//!
//! # Example
//!
//! ```no_run
//! use storefront_redpanda::RedpandaShippingNotifier;
//! use storefront_core::notifier::ShippingNotifier;
//! use storefront_core::shipment::ShipmentId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let notifier = RedpandaShippingNotifier::builder()
//!     .brokers("localhost:9092")
//!     .topic("shipping-notifications")
//!     .build()?;
//!
//! notifier.publish(&ShipmentId::new("ship-123")).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use storefront_core::notifier::{NotifierError, ShippingNotifier};
use storefront_core::shipment::ShipmentId;

const DEFAULT_TOPIC: &str = "shipping-notifications";

/// Redpanda-backed shipping notifier.
///
/// Publishes each shipment id as the message payload, keyed by the id so
/// announcements for the same shipment land in the same partition.
pub struct RedpandaShippingNotifier {
    /// Kafka producer for publishing announcements
    producer: FutureProducer,
    /// Topic the ids are published to
    topic: String,
    /// Producer send timeout
    timeout: Duration,
}

impl RedpandaShippingNotifier {
    /// Create a notifier with default configuration.
    ///
    /// # Parameters
    ///
    /// - `brokers`: Comma-separated list of broker addresses (e.g., "localhost:9092")
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::ConnectionFailed`] if the producer cannot
    /// be created.
    pub fn new(brokers: &str) -> Result<Self, NotifierError> {
        Self::builder().brokers(brokers).build()
    }

    /// Create a new builder for configuring the notifier.
    #[must_use]
    pub fn builder() -> RedpandaShippingNotifierBuilder {
        RedpandaShippingNotifierBuilder::default()
    }

    /// The topic announcements are published to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Builder for configuring a [`RedpandaShippingNotifier`].
#[derive(Default)]
pub struct RedpandaShippingNotifierBuilder {
    brokers: Option<String>,
    topic: Option<String>,
    producer_acks: Option<String>,
    compression: Option<String>,
    timeout: Option<Duration>,
}

impl RedpandaShippingNotifierBuilder {
    /// Set the broker addresses.
    #[must_use]
    pub fn brokers(mut self, brokers: impl Into<String>) -> Self {
        self.brokers = Some(brokers.into());
        self
    }

    /// Set the topic shipment ids are published to.
    ///
    /// Default: `"shipping-notifications"`
    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the producer acknowledgment mode.
    ///
    /// # Parameters
    ///
    /// - `acks`: "0" (no acks), "1" (leader ack), "all" (all replicas ack)
    ///
    /// Default: "1"
    #[must_use]
    pub fn producer_acks(mut self, acks: impl Into<String>) -> Self {
        self.producer_acks = Some(acks.into());
        self
    }

    /// Set the compression codec.
    ///
    /// # Parameters
    ///
    /// - `compression`: "none", "gzip", "snappy", "lz4", "zstd"
    ///
    /// Default: "none"
    #[must_use]
    pub fn compression(mut self, compression: impl Into<String>) -> Self {
        self.compression = Some(compression.into());
        self
    }

    /// Set the producer send timeout.
    ///
    /// Default: 5 seconds
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`RedpandaShippingNotifier`].
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::ConnectionFailed`] if:
    /// - Brokers not set
    /// - Cannot create producer
    /// - Invalid configuration
    pub fn build(self) -> Result<RedpandaShippingNotifier, NotifierError> {
        let brokers = self
            .brokers
            .ok_or_else(|| NotifierError::ConnectionFailed("Brokers not configured".to_string()))?;

        let mut producer_config = ClientConfig::new();
        producer_config
            .set("bootstrap.servers", &brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", self.producer_acks.as_deref().unwrap_or("1"))
            .set(
                "compression.type",
                self.compression.as_deref().unwrap_or("none"),
            );

        let producer: FutureProducer = producer_config.create().map_err(|e| {
            NotifierError::ConnectionFailed(format!("Failed to create producer: {e}"))
        })?;

        let topic = self.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string());

        tracing::info!(
            brokers = %brokers,
            topic = %topic,
            acks = self.producer_acks.as_deref().unwrap_or("1"),
            "RedpandaShippingNotifier created successfully"
        );

        Ok(RedpandaShippingNotifier {
            producer,
            topic,
            timeout: self.timeout.unwrap_or(Duration::from_secs(5)),
        })
    }
}

impl ShippingNotifier for RedpandaShippingNotifier {
    fn publish(
        &self,
        shipment_id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotifierError>> + Send + '_>> {
        let shipment_id = shipment_id.clone();

        Box::pin(async move {
            let payload = shipment_id.as_str().as_bytes();
            let record = FutureRecord::to(&self.topic)
                .payload(payload)
                .key(shipment_id.as_str());

            self.producer
                .send(record, self.timeout)
                .await
                .map_err(|(e, _message)| NotifierError::PublishFailed {
                    shipment_id: shipment_id.clone(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(shipment_id = %shipment_id, topic = %self.topic, "shipment announced");
            Ok(())
        })
    }
}
