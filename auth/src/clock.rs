use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Source of the current time for token issuance and validation.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock with second precision.
///
/// Useful for simulating token lifetimes without sleeping.
#[derive(Debug)]
pub struct FixedClock {
    timestamp: AtomicI64,
}

impl FixedClock {
    /// Create a clock frozen at `now` (sub-second precision is dropped).
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: AtomicI64::new(now.timestamp()),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        self.timestamp.store(now.timestamp(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        self.timestamp.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}
