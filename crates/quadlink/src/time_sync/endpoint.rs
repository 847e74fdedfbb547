// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time-sync endpoint: the client side of the skew-estimation protocol.
//!
//! Each exchange records four timestamps:
//!
//! ```text
//! local                         robot
//!   client_tx ──request──────▶  server_rx
//!   client_rx ◀──────response── server_tx
//! ```
//!
//! The next request carries the previous tuple and the session's clock
//! identifier; the robot answers with its current best skew estimate.

use super::{RobotTimeConverter, TimeSyncClient};
use crate::api::time_sync::{
    TimeSyncRoundTrip, TimeSyncStatus, TimeSyncUpdateRequest, TimeSyncUpdateResponse,
};
use crate::api::{RequestHeader, Timestamp, WireDuration};
use crate::rpc::{RpcParameters, RpcResult};
use crate::status::{SdkErrorCode, Status};
use crate::time::{nsec_from_timestamp, timestamp_from_nsec, NSEC_PER_SEC};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

#[derive(Debug)]
struct EndpointState {
    previous_round_trip: Option<TimeSyncRoundTrip>,
    latest_update_result: RpcResult<TimeSyncUpdateResponse>,
    clock_identifier: String,
}

/// Owner of the time-sync state for one robot session.
#[derive(Debug)]
pub struct TimeSyncEndpoint {
    client: Arc<TimeSyncClient>,
    params: RpcParameters,
    state: RwLock<EndpointState>,
    /// Serializes exchanges so round trips advance in order.
    exchange: Mutex<()>,
}

impl TimeSyncEndpoint {
    pub fn new(client: Arc<TimeSyncClient>) -> Self {
        Self::with_params(client, RpcParameters::default().with_logging_tag("time-sync"))
    }

    /// Endpoint issuing updates with `params`.
    pub fn with_params(client: Arc<TimeSyncClient>, params: RpcParameters) -> Self {
        Self {
            client,
            params,
            state: RwLock::new(EndpointState {
                previous_round_trip: None,
                latest_update_result: RpcResult::err(Status::sdk(
                    SdkErrorCode::PreviousTimeSyncUnavailableYet,
                    "no time-sync exchange has completed",
                )),
                clock_identifier: String::new(),
            }),
            exchange: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &Arc<TimeSyncClient> {
        &self.client
    }

    /// Perform one update exchange.
    ///
    /// On failure the endpoint state is left untouched and the failure is
    /// returned.
    pub fn get_new_estimate(&self) -> Status {
        let _exchange = self.exchange.lock();
        let clock = Arc::clone(self.client.core().clock());

        let (previous_round_trip, clock_identifier) = {
            let state = self.state.read();
            (state.previous_round_trip, state.clock_identifier.clone())
        };

        let client_tx = clock.now_timestamp();
        let request = TimeSyncUpdateRequest {
            header: Some(RequestHeader {
                request_timestamp: Some(client_tx),
                client_name: self.client.core().client_name().to_string(),
                disable_rpc_logging: false,
            }),
            previous_round_trip,
            clock_identifier,
        };

        let result = self.client.time_sync_update(request, &self.params);
        let client_rx = clock.now_timestamp();

        if !result.is_ok() {
            log::warn!("[time-sync] update failed: {}", result.status);
            return result.status;
        }

        let header = result.response.header.as_ref();
        let round_trip = TimeSyncRoundTrip {
            client_tx: Some(client_tx),
            server_rx: header.and_then(|h| h.request_received_timestamp),
            server_tx: header.and_then(|h| h.response_timestamp),
            client_rx: Some(client_rx),
        };

        let mut state = self.state.write();
        let received = result.response.clock_identifier.as_str();
        if state.clock_identifier.is_empty() {
            if !received.is_empty() {
                log::debug!("[time-sync] clock identifier {}", received);
                state.clock_identifier = received.to_string();
            }
        } else if !received.is_empty() && received != state.clock_identifier {
            log::warn!(
                "[time-sync] ignoring clock identifier change {} -> {}",
                state.clock_identifier,
                received
            );
        }

        log::trace!(
            "[time-sync] status={:?} skew={:?}",
            result.response.sync_status(),
            result
                .response
                .state
                .and_then(|s| s.best_estimate)
                .and_then(|e| e.clock_skew)
        );

        state.previous_round_trip = Some(round_trip);
        let status = result.status.clone();
        state.latest_update_result = result;
        status
    }

    /// Run up to `max_samples` exchanges; true iff established at the end.
    ///
    /// With `break_on_success`, stops as soon as sync is established (checked
    /// before each exchange).
    pub fn establish_time_sync(&self, max_samples: u32, break_on_success: bool) -> bool {
        for _ in 0..max_samples {
            if break_on_success && self.has_established_time_sync() {
                break;
            }
            let _ = self.get_new_estimate();
        }
        self.has_established_time_sync()
    }

    /// True when the latest exchange succeeded with status `OK`.
    pub fn has_established_time_sync(&self) -> bool {
        let state = self.state.read();
        state.latest_update_result.is_ok()
            && state.latest_update_result.response.sync_status() == TimeSyncStatus::Ok
    }

    /// Sync status of the latest successful exchange, `Unknown` before any.
    pub fn sync_status(&self) -> TimeSyncStatus {
        let state = self.state.read();
        if state.latest_update_result.is_ok() {
            state.latest_update_result.response.sync_status()
        } else {
            TimeSyncStatus::Unknown
        }
    }

    /// Current clock skew estimate.
    pub fn get_clock_skew(&self) -> Result<WireDuration, Status> {
        self.estimate_field("clock skew", |rsp| {
            rsp.state
                .and_then(|s| s.best_estimate)
                .and_then(|e| e.clock_skew)
        })
    }

    /// Round-trip time of the current estimate.
    pub fn round_trip_time(&self) -> Result<WireDuration, Status> {
        self.estimate_field("round trip time", |rsp| {
            rsp.state
                .and_then(|s| s.best_estimate)
                .and_then(|e| e.round_trip_time)
        })
    }

    /// Session identifier assigned by the robot.
    pub fn get_clock_identifier(&self) -> Result<String, Status> {
        let state = self.state.read();
        if state.clock_identifier.is_empty() {
            return Err(Status::sdk(
                SdkErrorCode::ClockIdentifierUnset,
                "time sync has not assigned a clock identifier",
            ));
        }
        Ok(state.clock_identifier.clone())
    }

    /// Converter built from the current skew.
    pub fn get_robot_time_converter(&self) -> Result<RobotTimeConverter, Status> {
        self.get_clock_skew().map(|skew| RobotTimeConverter::new(&skew))
    }

    /// Robot timestamp for local time given as fractional seconds since the epoch.
    pub fn robot_timestamp_from_local_secs(&self, local_secs: f64) -> Result<Timestamp, Status> {
        let converter = self.get_robot_time_converter()?;
        let local_nsec = (local_secs * NSEC_PER_SEC as f64).round() as i64;
        Ok(converter.robot_timestamp_from_local_nsec(local_nsec))
    }

    /// Last update result (initially `Sdk/PreviousTimeSyncUnavailableYet`).
    pub fn latest_update_result(&self) -> RpcResult<TimeSyncUpdateResponse> {
        self.state.read().latest_update_result.clone()
    }

    /// Timestamps of the last successful exchange.
    pub fn previous_round_trip(&self) -> Option<TimeSyncRoundTrip> {
        self.state.read().previous_round_trip
    }

    /// Local nanoseconds elapsed between `client_tx` and `client_rx` of the
    /// last exchange.
    pub fn last_exchange_nsec(&self) -> Option<i64> {
        let trip = self.previous_round_trip()?;
        let tx = nsec_from_timestamp(&trip.client_tx?);
        let rx = nsec_from_timestamp(&trip.client_rx?);
        Some(rx - tx)
    }

    /// Robot-time now, if sync is established.
    pub fn robot_now(&self) -> Result<Timestamp, Status> {
        let converter = self.get_robot_time_converter()?;
        let local = self.client.core().clock().now_nsec();
        Ok(timestamp_from_nsec(converter.robot_nsec_from_local(local)))
    }

    fn estimate_field(
        &self,
        what: &str,
        field: impl FnOnce(&TimeSyncUpdateResponse) -> Option<WireDuration>,
    ) -> Result<WireDuration, Status> {
        let state = self.state.read();
        let established = state.latest_update_result.is_ok()
            && state.latest_update_result.response.sync_status() == TimeSyncStatus::Ok;
        if !established {
            return Err(Status::sdk(
                SdkErrorCode::TimeSyncNotEstablished,
                format!("{} unavailable: time sync not established", what),
            ));
        }
        field(&state.latest_update_result.response).ok_or_else(|| {
            Status::sdk(
                SdkErrorCode::TimeSyncNotEstablished,
                format!("{} missing from the latest estimate", what),
            )
        })
    }
}
