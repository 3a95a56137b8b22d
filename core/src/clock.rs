//! Time source shared by the token codec, the revocation store and the
//! in-memory cache.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Source of the current time in whole seconds since the Unix epoch
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds
    fn now(&self) -> i64;

    /// Current time as a UTC datetime
    ///
    /// Timestamps outside the representable range clamp to its nearest end.
    fn now_utc(&self) -> DateTime<Utc> {
        to_utc(self.now())
    }
}

fn to_utc(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_else(|| {
        warn!(timestamp, "Clock timestamp out of range, clamping");
        if timestamp < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    })
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: i64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let other = clock.clone();

        clock.advance(30);
        assert_eq!(other.now(), 1_030);

        other.set(5);
        assert_eq!(clock.now(), 5);
        assert_eq!(clock.now_utc().timestamp(), 5);
    }

    #[test]
    fn test_out_of_range_timestamp_clamps() {
        let clock = ManualClock::new(i64::MAX);
        assert_eq!(clock.now_utc(), DateTime::<Utc>::MAX_UTC);

        clock.set(i64::MIN);
        assert_eq!(clock.now_utc(), DateTime::<Utc>::MIN_UTC);
    }
}
