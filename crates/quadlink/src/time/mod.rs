// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time utilities.
//!
//! - [`Clock`]: injectable wall clock, threaded through constructors
//! - conversions between nanosecond counts, [`SystemTime`], [`Duration`] and
//!   the wire [`Timestamp`] / [`WireDuration`] types
//! - [`RateLimiter`]: fixed-period pacing for polling loops

mod clock;
mod rate_limiter;

pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use rate_limiter::RateLimiter;

use crate::api::{Timestamp, WireDuration};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Nanoseconds per second.
pub const NSEC_PER_SEC: i64 = 1_000_000_000;

/// Longest budget [`deadline_after`] turns into an instant (about a century).
pub const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// `Instant::now() + budget`, capped at [`FAR_FUTURE`] so that budgets such
/// as `Duration::MAX` mean "no practical deadline" instead of overflowing.
pub fn deadline_after(budget: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(budget.min(FAR_FUTURE)).unwrap_or(now)
}

/// Nanoseconds since the epoch of a wire timestamp (saturating).
pub fn nsec_from_timestamp(ts: &Timestamp) -> i64 {
    ts.seconds
        .saturating_mul(NSEC_PER_SEC)
        .saturating_add(i64::from(ts.nanos))
}

/// Wire timestamp for `nsec` since the epoch; `nanos` is always non-negative.
pub fn timestamp_from_nsec(nsec: i64) -> Timestamp {
    Timestamp {
        seconds: nsec.div_euclid(NSEC_PER_SEC),
        nanos: nsec.rem_euclid(NSEC_PER_SEC) as i32,
    }
}

/// Signed nanosecond count of a wire duration (saturating).
pub fn nsec_from_duration(d: &WireDuration) -> i64 {
    d.seconds
        .saturating_mul(NSEC_PER_SEC)
        .saturating_add(i64::from(d.nanos))
}

/// Wire duration for a signed nanosecond count; both parts share the sign.
pub fn duration_from_nsec(nsec: i64) -> WireDuration {
    WireDuration {
        seconds: nsec / NSEC_PER_SEC,
        nanos: (nsec % NSEC_PER_SEC) as i32,
    }
}

/// Wire duration for a non-negative std duration.
pub fn duration_from_std(d: Duration) -> WireDuration {
    WireDuration {
        seconds: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        nanos: d.subsec_nanos() as i32,
    }
}

/// Std duration for a wire duration; negative spans clamp to zero.
pub fn std_from_duration(d: &WireDuration) -> Duration {
    let nsec = nsec_from_duration(d);
    if nsec <= 0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(nsec as u64)
    }
}

/// Seconds (fractional) of a wire duration.
pub fn secs_from_duration(d: &WireDuration) -> f64 {
    nsec_from_duration(d) as f64 / NSEC_PER_SEC as f64
}

/// Signed nanoseconds since the epoch of `t`; times before 1970 are negative.
pub fn nsec_from_system_time(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_nanos()).unwrap_or(i64::MAX),
    }
}

/// System time `nsec` after (or before, if negative) the epoch.
pub fn system_time_from_nsec(nsec: i64) -> SystemTime {
    if nsec >= 0 {
        UNIX_EPOCH + Duration::from_nanos(nsec as u64)
    } else {
        UNIX_EPOCH - Duration::from_nanos(nsec.unsigned_abs())
    }
}

/// Wire timestamp of a system time.
pub fn timestamp_from_system_time(t: SystemTime) -> Timestamp {
    timestamp_from_nsec(nsec_from_system_time(t))
}

/// System time of a wire timestamp.
pub fn system_time_from_timestamp(ts: &Timestamp) -> SystemTime {
    system_time_from_nsec(nsec_from_timestamp(ts))
}
