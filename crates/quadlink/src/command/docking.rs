// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Docking service client and the blocking dock/undock helpers.

use super::feedback::{FeedbackPoller, FeedbackState, PollOutcome};
use super::{call_params, fill_lease, leased_status};
use crate::api::docking::{
    DockingCommandFeedbackRequest, DockingCommandFeedbackResponse, DockingCommandRequest,
    DockingCommandResponse, DockingFeedbackStatus, PrepPoseBehavior,
};
use crate::lease::LeaseWallet;
use crate::rpc::{
    initiate_async_call, CallContext, ClientCore, Completion, RpcParameters, RpcResult,
    SharedFuture, SharedSlot, TransportStatus,
};
use crate::status::{SdkErrorCode, Status};
use crate::time_sync::TimeSyncEndpoint;
use std::sync::Arc;
use std::time::Instant;

pub trait DockingStub: Send + Sync {
    fn docking_command(
        &self,
        ctx: CallContext,
        request: DockingCommandRequest,
        done: Completion<DockingCommandResponse>,
    );

    fn docking_command_feedback(
        &self,
        ctx: CallContext,
        request: DockingCommandFeedbackRequest,
        done: Completion<DockingCommandFeedbackResponse>,
    );
}

/// Client for the docking service.
#[derive(Debug)]
pub struct DockingClient {
    core: ClientCore,
    stub: SharedSlot<dyn DockingStub>,
    wallet: SharedSlot<dyn LeaseWallet>,
}

impl DockingClient {
    pub const SERVICE_NAME: &'static str = "docking";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
            wallet: SharedSlot::empty(),
        }
    }

    pub fn set_comms(&self, stub: Arc<dyn DockingStub>) {
        self.stub.set(stub);
    }

    pub fn set_lease_wallet(&self, wallet: Arc<dyn LeaseWallet>) {
        self.wallet.set(wallet);
    }

    pub fn core(&self) -> &ClientCore {
        &self.core
    }

    pub fn docking_command_async(
        &self,
        mut request: DockingCommandRequest,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<DockingCommandResponse>> {
        let wallet = self.wallet.get();
        fill_lease(&mut request.lease, wallet.as_ref());
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.docking_command(ctx, request, done),
            move |_: &DockingCommandRequest,
                  response: DockingCommandResponse,
                  transport: TransportStatus| {
                let status =
                    leased_status(wallet.as_deref(), &transport, &response, response.status.status());
                RpcResult::new(status, response)
            },
        )
    }

    pub fn docking_command(
        &self,
        request: DockingCommandRequest,
        params: &RpcParameters,
    ) -> RpcResult<DockingCommandResponse> {
        self.docking_command_async(request, params).wait()
    }

    /// Progress of `docking_command_id`; `response.status` carries it.
    pub fn docking_command_feedback_async(
        &self,
        docking_command_id: u32,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<DockingCommandFeedbackResponse>> {
        let wallet = self.wallet.get();
        let request = DockingCommandFeedbackRequest {
            header: None,
            docking_command_id,
        };
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.docking_command_feedback(ctx, request, done),
            move |_: &DockingCommandFeedbackRequest,
                  response: DockingCommandFeedbackResponse,
                  transport: TransportStatus| {
                let status = leased_status(wallet.as_deref(), &transport, &response, Status::ok());
                RpcResult::new(status, response)
            },
        )
    }

    pub fn docking_command_feedback(
        &self,
        docking_command_id: u32,
        params: &RpcParameters,
    ) -> RpcResult<DockingCommandFeedbackResponse> {
        self.docking_command_feedback_async(docking_command_id, params)
            .wait()
    }
}

/// Feedback value that ends a maneuver with `behavior` successfully.
fn goal_for(behavior: PrepPoseBehavior) -> DockingFeedbackStatus {
    match behavior {
        PrepPoseBehavior::OnlyPose => DockingFeedbackStatus::AtPrepPose,
        PrepPoseBehavior::Undock => DockingFeedbackStatus::Undocked,
        _ => DockingFeedbackStatus::Docked,
    }
}

fn classify(status: DockingFeedbackStatus, goal: DockingFeedbackStatus) -> FeedbackState {
    if status == goal {
        return FeedbackState::Succeeded;
    }
    match status {
        DockingFeedbackStatus::InProgress
        | DockingFeedbackStatus::Docked
        | DockingFeedbackStatus::AtPrepPose
        | DockingFeedbackStatus::Undocked => FeedbackState::InProgress(status.status()),
        other => FeedbackState::Failed(other.status()),
    }
}

/// Failures of the maneuver itself; another attempt may succeed.
fn worth_retrying(status: DockingFeedbackStatus) -> bool {
    matches!(
        status,
        DockingFeedbackStatus::ErrorDockLost
            | DockingFeedbackStatus::ErrorStuck
            | DockingFeedbackStatus::ErrorTooDistant
            | DockingFeedbackStatus::ErrorCommandTimedOut
    )
}

/// Dock at `station_id`, retrying failed maneuvers.
///
/// `attempts <= 0` retries until the poller's deadline. Each command carries
/// the deadline as a robot-time end time, so `endpoint` must have an
/// established time sync. The early-end predicate of `poller` aborts the
/// whole helper and returns the last observed status, or `Sdk/EarlyEnd` if
/// nothing was observed yet.
pub fn blocking_dock(
    client: &DockingClient,
    endpoint: &TimeSyncEndpoint,
    station_id: u32,
    prep_pose: PrepPoseBehavior,
    attempts: i32,
    poller: &FeedbackPoller,
) -> Status {
    if let Err(status) = poller.validate() {
        return status;
    }
    let deadline = poller.deadline_from_now();
    let converter = match endpoint.get_robot_time_converter() {
        Ok(converter) => converter,
        Err(status) => return status,
    };
    let clock_identifier = match endpoint.get_clock_identifier() {
        Ok(id) => id,
        Err(status) => return status,
    };
    let goal = goal_for(prep_pose);
    let mut last: Option<Status> = None;
    let mut attempt = 0;

    while attempts <= 0 || attempt < attempts {
        attempt += 1;
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        if poller.should_end_early() {
            log::debug!("[docking] station {} ended early before attempt {}", station_id, attempt);
            return last.unwrap_or_else(|| {
                Status::sdk(
                    SdkErrorCode::EarlyEnd,
                    format!("docking at station {} ended before any command", station_id),
                )
            });
        }

        let request = DockingCommandRequest {
            docking_station_id: station_id,
            clock_identifier: clock_identifier.clone(),
            end_time: Some(
                converter.robot_timestamp_from_local_duration(client.core().clock().as_ref(), remaining),
            ),
            prep_pose_behavior: prep_pose,
            ..Default::default()
        };
        let issued = client.docking_command(request, &call_params("docking", deadline));
        if !issued.is_ok() {
            return issued.status;
        }
        let id = issued.response.docking_command_id;
        log::debug!(
            "[docking] station {} attempt {} issued as command {}",
            station_id,
            attempt,
            id
        );

        let mut observed = DockingFeedbackStatus::Unknown;
        let outcome = poller.poll(
            deadline,
            format!("docking command {}", id),
            issued.status,
            |remaining| {
                let params = RpcParameters::default()
                    .with_logging_tag("docking")
                    .with_deadline(remaining);
                let feedback = client.docking_command_feedback(id, &params);
                if !feedback.is_ok() {
                    return Err(feedback.status);
                }
                observed = feedback.response.status;
                Ok(classify(observed, goal))
            },
        );

        match outcome {
            PollOutcome::Succeeded => return Status::ok(),
            PollOutcome::Failed(status) if worth_retrying(observed) => {
                log::warn!(
                    "[docking] attempt {} at station {} failed: {}",
                    attempt,
                    station_id,
                    status
                );
                last = Some(status);
            }
            other => return other.into_status(),
        }
    }

    match last {
        Some(status) if !deadline.saturating_duration_since(Instant::now()).is_zero() => status,
        _ => Status::sdk(SdkErrorCode::CommandTimedOutError, String::new())
            .chain(format!("docking at station {} not finished at deadline", station_id)),
    }
}

/// Leave the dock in a single attempt.
pub fn blocking_undock(
    client: &DockingClient,
    endpoint: &TimeSyncEndpoint,
    poller: &FeedbackPoller,
) -> Status {
    blocking_dock(client, endpoint, 0, PrepPoseBehavior::Undock, 1, poller)
}
