// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time-sync service messages.

use super::{impl_request, impl_response, RequestHeader, ResponseHeader, Timestamp, WireDuration};

/// Four timestamps of one completed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSyncRoundTrip {
    /// Local time the request left.
    pub client_tx: Option<Timestamp>,
    /// Robot time the request arrived.
    pub server_rx: Option<Timestamp>,
    /// Robot time the response was composed.
    pub server_tx: Option<Timestamp>,
    /// Local time the response arrived.
    pub client_rx: Option<Timestamp>,
}

/// Skew estimate computed by the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSyncEstimate {
    /// Duration to add to local time to get robot time.
    pub clock_skew: Option<WireDuration>,
    pub round_trip_time: Option<WireDuration>,
}

/// Progress of a time-sync session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum TimeSyncStatus {
    #[default]
    Unknown = 0,
    /// Estimate is good.
    Ok = 1,
    MoreSamplesNeeded = 2,
    ServiceNotReady = 3,
}

/// Estimate state returned on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSyncState {
    pub best_estimate: Option<TimeSyncEstimate>,
    pub status: TimeSyncStatus,
    /// Robot time the estimate was computed.
    pub measurement_time: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct TimeSyncUpdateRequest {
    pub header: Option<RequestHeader>,
    /// Timestamps of the previous exchange; absent on the first one.
    pub previous_round_trip: Option<TimeSyncRoundTrip>,
    /// Session identifier; empty on the first exchange.
    pub clock_identifier: String,
}

impl_request!(TimeSyncUpdateRequest, "robot.api.TimeSyncUpdateRequest");

#[derive(Debug, Clone, Default)]
pub struct TimeSyncUpdateResponse {
    pub header: Option<ResponseHeader>,
    pub previous_estimate: Option<TimeSyncEstimate>,
    pub state: Option<TimeSyncState>,
    /// Session identifier assigned by the robot.
    pub clock_identifier: String,
}

impl_response!(TimeSyncUpdateResponse, "robot.api.TimeSyncUpdateResponse");

impl TimeSyncUpdateResponse {
    /// Status of the returned state, `Unknown` if absent.
    pub fn sync_status(&self) -> TimeSyncStatus {
        self.state.map(|s| s.status).unwrap_or_default()
    }
}
