// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Local-to-robot time conversion.

use crate::api::{Timestamp, WireDuration};
use crate::time::{
    duration_from_nsec, nsec_from_duration, nsec_from_system_time, nsec_from_timestamp,
    timestamp_from_nsec, Clock,
};
use std::time::{Duration, SystemTime};

/// Maps local time points to robot timestamps by adding the clock skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RobotTimeConverter {
    skew_nsec: i64,
}

impl RobotTimeConverter {
    pub fn new(skew: &WireDuration) -> Self {
        Self {
            skew_nsec: nsec_from_duration(skew),
        }
    }

    pub fn from_skew_nsec(skew_nsec: i64) -> Self {
        Self { skew_nsec }
    }

    /// Skew as a wire duration.
    pub fn skew(&self) -> WireDuration {
        duration_from_nsec(self.skew_nsec)
    }

    pub fn skew_nsec(&self) -> i64 {
        self.skew_nsec
    }

    /// Robot nanoseconds for local nanoseconds.
    pub fn robot_nsec_from_local(&self, local_nsec: i64) -> i64 {
        local_nsec.saturating_add(self.skew_nsec)
    }

    pub fn robot_timestamp_from_local_nsec(&self, local_nsec: i64) -> Timestamp {
        timestamp_from_nsec(self.robot_nsec_from_local(local_nsec))
    }

    pub fn robot_timestamp_from_local(&self, local: SystemTime) -> Timestamp {
        self.robot_timestamp_from_local_nsec(nsec_from_system_time(local))
    }

    /// Robot timestamp `from_now` after the current local time.
    pub fn robot_timestamp_from_local_duration(
        &self,
        clock: &dyn Clock,
        from_now: Duration,
    ) -> Timestamp {
        let offset = i64::try_from(from_now.as_nanos()).unwrap_or(i64::MAX);
        self.robot_timestamp_from_local_nsec(clock.now_nsec().saturating_add(offset))
    }

    /// Local nanoseconds for a robot timestamp.
    pub fn local_nsec_from_robot(&self, robot: &Timestamp) -> i64 {
        nsec_from_timestamp(robot).saturating_sub(self.skew_nsec)
    }
}
