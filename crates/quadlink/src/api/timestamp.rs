// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire timestamp and signed duration.
//!
//! Both follow the protobuf well-known-type layout: whole seconds plus a
//! nanosecond part. Conversions to and from nanosecond counts live in
//! [`crate::time`].

/// Point in time as seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    pub seconds: i64,
    /// Non-negative fraction of a second, `0..1_000_000_000`.
    pub nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

/// Signed span of time; `seconds` and `nanos` carry the same sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WireDuration {
    pub seconds: i64,
    pub nanos: i32,
}

impl WireDuration {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}
