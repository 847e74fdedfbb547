// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Injectable wall clock.

use super::{nsec_from_system_time, system_time_from_nsec, timestamp_from_nsec};
use crate::api::Timestamp;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Source of local wall-clock time.
///
/// Everything that stamps a header or converts local time to robot time takes
/// a clock; tests substitute a [`ManualClock`].
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current local time.
    fn now(&self) -> SystemTime;

    /// Current local time as nanoseconds since the epoch.
    fn now_nsec(&self) -> i64 {
        nsec_from_system_time(self.now())
    }

    /// Current local time as a wire timestamp.
    fn now_timestamp(&self) -> Timestamp {
        timestamp_from_nsec(self.now_nsec())
    }
}

/// Shared clock handle.
pub type SharedClock = Arc<dyn Clock>;

/// The host's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Shared handle to [`SystemClock`].
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    nsec: AtomicI64,
}

impl ManualClock {
    /// Clock reading `nsec` since the epoch.
    pub fn new(nsec: i64) -> Self {
        Self {
            nsec: AtomicI64::new(nsec),
        }
    }

    /// Shared clock reading `nsec` since the epoch.
    pub fn shared(nsec: i64) -> Arc<Self> {
        Arc::new(Self::new(nsec))
    }

    /// Jump to `nsec`.
    pub fn set_nsec(&self, nsec: i64) {
        self.nsec.store(nsec, Ordering::Release);
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: Duration) {
        let step = i64::try_from(by.as_nanos()).unwrap_or(i64::MAX);
        self.nsec.fetch_add(step, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        system_time_from_nsec(self.now_nsec())
    }

    fn now_nsec(&self) -> i64 {
        self.nsec.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_on_request() {
        let clock = ManualClock::new(5);
        assert_eq!(clock.now_nsec(), 5);
        clock.advance(Duration::from_nanos(10));
        assert_eq!(clock.now_nsec(), 15);
        clock.set_nsec(2_000_000_001);
        assert_eq!(clock.now_timestamp(), Timestamp::new(2, 1));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(system_clock().now_nsec() > 0);
    }
}
