//! In-memory collaborator implementations for fast, deterministic tests.
//!
//! - [`FixedClock`]: deterministic time
//! - [`InMemoryShipmentStore`]: `HashMap`-backed shipment persistence
//! - [`RecordingNotifier`]: captures published shipment ids
//!
//! Store and notifier support failure injection so tests can observe the
//! coordinator's behavior in every partial-failure window.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use storefront_core::environment::Clock;
use storefront_core::notifier::{NotifierError, ShippingNotifier};
use storefront_core::shipment::{ShipmentId, ShipmentRecord, ShippingStatus};
use storefront_core::store::{ShipmentStore, ShipmentStoreError};

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making tests reproducible.
///
/// # Example
///
/// ```
/// use storefront_testing::mocks::FixedClock;
/// use storefront_core::environment::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// let time1 = clock.now();
/// let time2 = clock.now();
/// assert_eq!(time1, time2); // Always the same!
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// In-memory shipment store for fast, deterministic testing.
///
/// Cloning shares the underlying map, so a test can hold one handle while
/// the coordinator owns another.
///
/// # Example
///
/// ```
/// use storefront_testing::InMemoryShipmentStore;
///
/// let store = InMemoryShipmentStore::new();
/// assert!(store.is_empty());
/// assert_eq!(store.put_count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryShipmentStore {
    records: Arc<RwLock<HashMap<String, ShipmentRecord>>>,
    puts: Arc<AtomicUsize>,
    status_updates: Arc<AtomicUsize>,
    fail_puts: Arc<AtomicBool>,
    fail_status_updates: Arc<AtomicBool>,
}

impl InMemoryShipmentStore {
    /// Create a new empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all records and counters (for test isolation)
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
        self.puts.store(0, Ordering::SeqCst);
        self.status_updates.store(0, Ordering::SeqCst);
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// True iff no records are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// True iff a record exists under `id`
    #[must_use]
    pub fn contains(&self, id: &ShipmentId) -> bool {
        self.records.read().unwrap().contains_key(id.as_str())
    }

    /// Snapshot of the record under `id`, if any
    #[must_use]
    pub fn record(&self, id: &ShipmentId) -> Option<ShipmentRecord> {
        self.records.read().unwrap().get(id.as_str()).cloned()
    }

    /// Number of successful `put` calls
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of successful `update_status` calls
    #[must_use]
    pub fn status_update_count(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }

    /// Make subsequent `put` calls fail with a backend error
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `update_status` calls fail with a backend error
    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }
}

impl ShipmentStore for InMemoryShipmentStore {
    fn put(
        &self,
        record: ShipmentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_puts.load(Ordering::SeqCst) {
                return Err(ShipmentStoreError::Backend(
                    "injected put failure".to_string(),
                ));
            }
            self.records
                .write()
                .unwrap()
                .insert(record.shipping_id.as_str().to_string(), record);
            self.puts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn get(
        &self,
        id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ShipmentRecord>, ShipmentStoreError>> + Send + '_>>
    {
        let id = id.clone();
        Box::pin(async move { Ok(self.records.read().unwrap().get(id.as_str()).cloned()) })
    }

    fn update_status(
        &self,
        id: &ShipmentId,
        status: ShippingStatus,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>> {
        let id = id.clone();
        Box::pin(async move {
            if self.fail_status_updates.load(Ordering::SeqCst) {
                return Err(ShipmentStoreError::Backend(
                    "injected status update failure".to_string(),
                ));
            }
            let mut records = self.records.write().unwrap();
            let record = records
                .get_mut(id.as_str())
                .ok_or_else(|| ShipmentStoreError::NotFound(id.clone()))?;
            record.shipping_status = status;
            self.status_updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

/// Notifier that records published shipment ids instead of enqueuing them.
///
/// # Example
///
/// ```
/// use storefront_testing::RecordingNotifier;
///
/// let notifier = RecordingNotifier::new();
/// assert_eq!(notifier.publish_count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    published: Arc<RwLock<Vec<ShipmentId>>>,
    fail_publishes: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Create a new notifier with an empty publish log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of published ids, in publish order
    #[must_use]
    pub fn published(&self) -> Vec<ShipmentId> {
        self.published.read().unwrap().clone()
    }

    /// Number of successful publishes
    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.published.read().unwrap().len()
    }

    /// Make subsequent `publish` calls fail
    pub fn fail_publishes(&self, fail: bool) {
        self.fail_publishes.store(fail, Ordering::SeqCst);
    }
}

impl ShippingNotifier for RecordingNotifier {
    fn publish(
        &self,
        shipment_id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotifierError>> + Send + '_>> {
        let shipment_id = shipment_id.clone();
        Box::pin(async move {
            if self.fail_publishes.load(Ordering::SeqCst) {
                return Err(NotifierError::PublishFailed {
                    shipment_id,
                    reason: "injected publish failure".to_string(),
                });
            }
            self.published.write().unwrap().push(shipment_id);
            Ok(())
        })
    }
}
