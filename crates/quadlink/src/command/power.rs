// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Power service client and power helpers.

use super::feedback::{FeedbackPoller, FeedbackState};
use super::robot::{RobotCommandClient, RobotStateClient};
use super::{call_params, fill_lease, leased_status};
use crate::api::power::{
    PowerCommandFeedbackRequest, PowerCommandFeedbackResponse, PowerCommandRequest,
    PowerCommandResponse, PowerCommandStatus, PowerRequest,
};
use crate::api::robot_command::{RobotCommand, RobotCommandRequest};
use crate::api::robot_state::MotorPowerState;
use crate::lease::LeaseWallet;
use crate::rpc::{
    initiate_async_call, CallContext, ClientCore, Completion, RpcParameters, RpcResult,
    SharedFuture, SharedSlot, TransportStatus,
};
use crate::status::Status;
use std::sync::Arc;

/// Transport surface of the power service.
pub trait PowerStub: Send + Sync {
    fn power_command(
        &self,
        ctx: CallContext,
        request: PowerCommandRequest,
        done: Completion<PowerCommandResponse>,
    );

    fn power_command_feedback(
        &self,
        ctx: CallContext,
        request: PowerCommandFeedbackRequest,
        done: Completion<PowerCommandFeedbackResponse>,
    );
}

/// Client for the power service.
#[derive(Debug)]
pub struct PowerClient {
    core: ClientCore,
    stub: SharedSlot<dyn PowerStub>,
    wallet: SharedSlot<dyn LeaseWallet>,
}

impl PowerClient {
    pub const SERVICE_NAME: &'static str = "power";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
            wallet: SharedSlot::empty(),
        }
    }

    pub fn set_comms(&self, stub: Arc<dyn PowerStub>) {
        self.stub.set(stub);
    }

    /// Wallet supplying the body lease and absorbing lease results.
    pub fn set_lease_wallet(&self, wallet: Arc<dyn LeaseWallet>) {
        self.wallet.set(wallet);
    }

    pub fn core(&self) -> &ClientCore {
        &self.core
    }

    /// Issue a power command. `InProgress` and `Success` both count as
    /// accepted.
    pub fn power_command_async(
        &self,
        mut request: PowerCommandRequest,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<PowerCommandResponse>> {
        let wallet = self.wallet.get();
        fill_lease(&mut request.lease, wallet.as_ref());
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.power_command(ctx, request, done),
            move |_: &PowerCommandRequest,
                  response: PowerCommandResponse,
                  transport: TransportStatus| {
                let status =
                    leased_status(wallet.as_deref(), &transport, &response, response.status.status());
                RpcResult::new(status, response)
            },
        )
    }

    pub fn power_command(
        &self,
        request: PowerCommandRequest,
        params: &RpcParameters,
    ) -> RpcResult<PowerCommandResponse> {
        self.power_command_async(request, params).wait()
    }

    /// Progress of `power_command_id`. The call succeeds whatever the
    /// reported progress; callers interpret `response.status`.
    pub fn power_command_feedback_async(
        &self,
        power_command_id: u32,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<PowerCommandFeedbackResponse>> {
        let request = PowerCommandFeedbackRequest {
            header: None,
            power_command_id,
        };
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.power_command_feedback(ctx, request, done),
            |_: &PowerCommandFeedbackRequest,
             response: PowerCommandFeedbackResponse,
             transport: TransportStatus| {
                let status = leased_status(None, &transport, &response, Status::ok());
                RpcResult::new(status, response)
            },
        )
    }

    pub fn power_command_feedback(
        &self,
        power_command_id: u32,
        params: &RpcParameters,
    ) -> RpcResult<PowerCommandFeedbackResponse> {
        self.power_command_feedback_async(power_command_id, params)
            .wait()
    }
}

fn classify(status: PowerCommandStatus) -> FeedbackState {
    match status {
        PowerCommandStatus::Success => FeedbackState::Succeeded,
        PowerCommandStatus::InProgress => FeedbackState::InProgress(status.status()),
        other => FeedbackState::Failed(other.status()),
    }
}

/// Issue `request` and poll its feedback until it completes.
pub fn power_command_with_feedback(
    client: &PowerClient,
    request: PowerRequest,
    poller: &FeedbackPoller,
) -> Status {
    if let Err(status) = poller.validate() {
        return status;
    }
    let deadline = poller.deadline_from_now();

    let issued = client.power_command(
        PowerCommandRequest {
            request,
            ..Default::default()
        },
        &call_params("power", deadline),
    );
    if !issued.is_ok() {
        return issued.status;
    }
    let id = issued.response.power_command_id;
    if issued.response.status == PowerCommandStatus::Success {
        log::debug!("[power] {} completed immediately", request.as_str());
        return Status::ok();
    }
    log::debug!("[power] {} issued as command {}", request.as_str(), id);

    poller
        .poll(
            deadline,
            format!("power command {}", id),
            issued.status,
            |remaining| {
                let params = RpcParameters::default()
                    .with_logging_tag("power")
                    .with_deadline(remaining);
                let feedback = client.power_command_feedback(id, &params);
                if feedback.is_ok() {
                    Ok(classify(feedback.response.status))
                } else {
                    Err(feedback.status)
                }
            },
        )
        .into_status()
}

pub fn power_on_motors(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OnMotors, poller)
}

/// Cut motor power immediately; the robot falls if standing. Prefer
/// [`safe_power_off_motors`].
pub fn power_off_motors(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OffMotors, poller)
}

pub fn power_cycle_robot(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::CycleRobot, poller)
}

pub fn power_off_robot(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OffRobot, poller)
}

pub fn power_on_payload_ports(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OnPayloadPorts, poller)
}

pub fn power_off_payload_ports(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OffPayloadPorts, poller)
}

pub fn power_on_wifi_radio(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OnWifiRadio, poller)
}

pub fn power_off_wifi_radio(client: &PowerClient, poller: &FeedbackPoller) -> Status {
    power_command_with_feedback(client, PowerRequest::OffWifiRadio, poller)
}

/// Sit the robot down through a safe-power-off robot command, then watch
/// robot state until the motors report off.
pub fn safe_power_off_motors(
    command_client: &RobotCommandClient,
    state_client: &RobotStateClient,
    poller: &FeedbackPoller,
) -> Status {
    if let Err(status) = poller.validate() {
        return status;
    }
    let deadline = poller.deadline_from_now();

    let issued = command_client.robot_command(
        RobotCommandRequest {
            command: RobotCommand::SafePowerOff,
            ..Default::default()
        },
        &call_params("power", deadline),
    );
    if !issued.is_ok() {
        return issued.status;
    }
    let id = issued.response.robot_command_id;
    log::debug!("[power] safe power off issued as robot command {}", id);

    poller
        .poll(
            deadline,
            format!("safe power off {}", id),
            issued.status,
            |remaining| {
                let params = RpcParameters::default()
                    .with_logging_tag("power")
                    .with_deadline(remaining);
                let state = state_client.get_robot_state(&params);
                if !state.is_ok() {
                    return Err(state.status);
                }
                Ok(match state.response.motor_power_state() {
                    MotorPowerState::Off => FeedbackState::Succeeded,
                    _ => FeedbackState::InProgress(Status::ok()),
                })
            },
        )
        .into_status()
}

/// [`safe_power_off_motors`] followed by a robot power-off, each with the
/// full budget of `poller`.
pub fn safe_power_off_robot(
    command_client: &RobotCommandClient,
    state_client: &RobotStateClient,
    power_client: &PowerClient,
    poller: &FeedbackPoller,
) -> Status {
    let motors = safe_power_off_motors(command_client, state_client, poller);
    if !motors.is_ok() {
        return motors;
    }
    power_off_robot(power_client, poller)
}

/// True iff the robot reports its motors on.
pub fn is_powered_on(state_client: &RobotStateClient, params: &RpcParameters) -> Result<bool, Status> {
    state_client
        .get_robot_state(params)
        .into_result()
        .map(|state| state.motor_power_state() == MotorPowerState::On)
}
