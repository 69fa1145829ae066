//! Dependency injection traits for ambient capabilities.
//!
//! All time observations go through the [`Clock`] trait so that business
//! logic stays deterministic under test. Production code injects
//! [`SystemClock`]; tests inject a fixed clock from the testing crate.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use storefront_core::environment::{Clock, SystemClock};
///
/// fn deadline(clock: &dyn Clock) -> chrono::DateTime<chrono::Utc> {
///     clock.now() + chrono::Duration::seconds(30)
/// }
///
/// let clock = SystemClock;
/// assert!(deadline(&clock) > clock.now());
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
