//! Integration tests for [`RedpandaShippingNotifier`] with a real
//! Kafka-compatible broker.
//!
//! # Running These Tests
//!
//! These tests are marked as `#[ignore]` by default because they:
//! - Require Docker to be running (for testcontainers)
//! - Take 15-60 seconds per test to spin up Kafka
//! - Can be flaky due to Kafka's distributed nature and timing
//!
//! To run explicitly:
//! ```bash
//! cargo test -p storefront-redpanda --test integration_tests -- --ignored
//! ```

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use std::time::Duration;
use storefront_core::notifier::ShippingNotifier;
use storefront_core::shipment::ShipmentId;
use storefront_redpanda::RedpandaShippingNotifier;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::kafka::{KAFKA_PORT, Kafka};

/// Helper to wait until the broker accepts publishes.
async fn wait_for_broker_ready(brokers: &str) {
    let max_attempts = 60;
    for attempt in 1..=max_attempts {
        if let Ok(notifier) = RedpandaShippingNotifier::builder()
            .brokers(brokers)
            .topic("warmup-topic")
            .build()
        {
            if notifier.publish(&ShipmentId::new("warmup")).await.is_ok() {
                tokio::time::sleep(Duration::from_millis(500)).await;
                return;
            }
        }
        if attempt == max_attempts {
            panic!("broker never became ready at {brokers}");
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn published_shipment_id_arrives_on_topic() {
    let container = Kafka::default()
        .start()
        .await
        .expect("Failed to start kafka container");
    let port = container
        .get_host_port_ipv4(KAFKA_PORT)
        .await
        .expect("Failed to get kafka port");
    let brokers = format!("127.0.0.1:{port}");

    wait_for_broker_ready(&brokers).await;

    let topic = "shipping-notifications-test";
    let notifier = RedpandaShippingNotifier::builder()
        .brokers(&brokers)
        .topic(topic)
        .build()
        .expect("notifier builds");

    let shipment_id = ShipmentId::new("ship-integration-1");
    notifier
        .publish(&shipment_id)
        .await
        .expect("publish succeeds");

    // Consume the announcement back with a raw consumer
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &brokers)
        .set("group.id", "shipping-notifier-test")
        .set("auto.offset.reset", "earliest")
        .create()
        .expect("consumer builds");
    consumer.subscribe(&[topic]).expect("subscription succeeds");

    let message = tokio::time::timeout(Duration::from_secs(30), consumer.recv())
        .await
        .expect("message arrives in time")
        .expect("message is readable");

    let payload = message.payload().expect("payload present");
    assert_eq!(payload, shipment_id.as_str().as_bytes());
}
