// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-period pacing for polling loops.

use std::thread;
use std::time::{Duration, Instant};

/// Paces a loop so that consecutive passes start at least one period apart.
///
/// A limiter without a period never sleeps.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    period: Option<Duration>,
    pass_started: Option<Instant>,
}

impl RateLimiter {
    /// Limiter with the given minimum period between passes.
    pub fn new(period: Duration) -> Self {
        Self {
            period: Some(period),
            pass_started: None,
        }
    }

    /// Limiter that never sleeps.
    pub fn unlimited() -> Self {
        Self {
            period: None,
            pass_started: None,
        }
    }

    /// Limiter for `hz` passes per second.
    ///
    /// Negative (or non-finite) rates mean no pacing. Zero is rejected. A
    /// rate so low that its period does not fit a [`Duration`] gets
    /// `Duration::MAX`; [`RateLimiter::wait`] is still bounded by its budget.
    pub fn from_frequency(hz: f64) -> Option<Self> {
        if hz == 0.0 {
            return None;
        }
        if hz < 0.0 || !hz.is_finite() {
            return Some(Self::unlimited());
        }
        Some(Self::new(
            Duration::try_from_secs_f64(1.0 / hz).unwrap_or(Duration::MAX),
        ))
    }

    /// Configured period.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Mark the start of a pass.
    pub fn begin_pass(&mut self) {
        self.pass_started = Some(Instant::now());
    }

    /// Time left before the next pass may start.
    pub fn remaining(&self) -> Duration {
        match (self.period, self.pass_started) {
            (Some(period), Some(started)) => period.saturating_sub(started.elapsed()),
            _ => Duration::ZERO,
        }
    }

    /// Sleep for [`RateLimiter::remaining`], capped at `budget`.
    pub fn wait(&self, budget: Duration) {
        let delay = self.remaining().min(budget);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frequency_is_rejected() {
        assert!(RateLimiter::from_frequency(0.0).is_none());
    }

    #[test]
    fn negative_frequency_never_sleeps() {
        let mut limiter = RateLimiter::from_frequency(-1.0).unwrap();
        limiter.begin_pass();
        assert_eq!(limiter.period(), None);
        assert_eq!(limiter.remaining(), Duration::ZERO);
    }

    #[test]
    fn remaining_shrinks_with_elapsed_time() {
        let mut limiter = RateLimiter::from_frequency(10.0).unwrap();
        assert_eq!(limiter.remaining(), Duration::ZERO);
        limiter.begin_pass();
        let left = limiter.remaining();
        assert!(left <= Duration::from_millis(100));
        assert!(left > Duration::from_millis(50));

        let start = Instant::now();
        limiter.wait(Duration::from_secs(1));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(limiter.remaining(), Duration::ZERO);
    }

    #[test]
    fn tiny_frequency_saturates_period() {
        let mut limiter = RateLimiter::from_frequency(1e-20).unwrap();
        assert_eq!(limiter.period(), Some(Duration::MAX));
        limiter.begin_pass();
        let start = Instant::now();
        limiter.wait(Duration::from_millis(10));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn wait_respects_budget() {
        let mut limiter = RateLimiter::new(Duration::from_secs(10));
        limiter.begin_pass();
        let start = Instant::now();
        limiter.wait(Duration::from_millis(10));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
