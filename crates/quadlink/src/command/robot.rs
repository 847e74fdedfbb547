// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Robot command and robot state clients.

use super::{fill_lease, leased_status};
use crate::api::robot_command::{RobotCommand, RobotCommandRequest, RobotCommandResponse};
use crate::api::robot_state::{RobotState, RobotStateRequest, RobotStateResponse};
use crate::lease::LeaseWallet;
use crate::rpc::{
    initiate_async_call, CallContext, ClientCore, Completion, RpcParameters, RpcResult,
    SharedFuture, SharedSlot, TransportStatus,
};
use crate::status::{SdkErrorCode, Status};
use crate::time_sync::TimeSyncEndpoint;
use std::sync::Arc;
use std::time::Duration;

pub trait RobotCommandStub: Send + Sync {
    fn robot_command(
        &self,
        ctx: CallContext,
        request: RobotCommandRequest,
        done: Completion<RobotCommandResponse>,
    );
}

/// Client for the robot command service.
#[derive(Debug)]
pub struct RobotCommandClient {
    core: ClientCore,
    stub: SharedSlot<dyn RobotCommandStub>,
    wallet: SharedSlot<dyn LeaseWallet>,
    time_sync: SharedSlot<TimeSyncEndpoint>,
}

impl RobotCommandClient {
    pub const SERVICE_NAME: &'static str = "robot-command";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
            wallet: SharedSlot::empty(),
            time_sync: SharedSlot::empty(),
        }
    }

    pub fn set_comms(&self, stub: Arc<dyn RobotCommandStub>) {
        self.stub.set(stub);
    }

    pub fn set_lease_wallet(&self, wallet: Arc<dyn LeaseWallet>) {
        self.wallet.set(wallet);
    }

    /// Endpoint used to express command end times in robot time.
    pub fn set_time_sync_endpoint(&self, endpoint: Arc<TimeSyncEndpoint>) {
        self.time_sync.set(endpoint);
    }

    pub fn robot_command_async(
        &self,
        mut request: RobotCommandRequest,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<RobotCommandResponse>> {
        let wallet = self.wallet.get();
        fill_lease(&mut request.lease, wallet.as_ref());
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.robot_command(ctx, request, done),
            move |_: &RobotCommandRequest,
                  response: RobotCommandResponse,
                  transport: TransportStatus| {
                let mut accepted = response.status.status();
                if !accepted.is_ok() && !response.message.is_empty() {
                    accepted = accepted.chain(&response.message);
                }
                let status = leased_status(wallet.as_deref(), &transport, &response, accepted);
                RpcResult::new(status, response)
            },
        )
    }

    pub fn robot_command(
        &self,
        request: RobotCommandRequest,
        params: &RpcParameters,
    ) -> RpcResult<RobotCommandResponse> {
        self.robot_command_async(request, params).wait()
    }

    /// Issue `command` so that it expires `end_time` from now on the robot's
    /// clock. Requires an established time-sync endpoint.
    pub fn robot_command_until(
        &self,
        command: RobotCommand,
        end_time: Duration,
        params: &RpcParameters,
    ) -> RpcResult<RobotCommandResponse> {
        let Some(endpoint) = self.time_sync.get() else {
            return RpcResult::err(Status::sdk(
                SdkErrorCode::TimeSyncNotEstablished,
                "no time-sync endpoint attached to the robot command client",
            ));
        };
        let converter = match endpoint.get_robot_time_converter() {
            Ok(converter) => converter,
            Err(status) => return RpcResult::err(status),
        };
        let clock_identifier = match endpoint.get_clock_identifier() {
            Ok(id) => id,
            Err(status) => return RpcResult::err(status),
        };
        let request = RobotCommandRequest {
            command,
            clock_identifier,
            end_time: Some(
                converter.robot_timestamp_from_local_duration(self.core.clock().as_ref(), end_time),
            ),
            ..Default::default()
        };
        self.robot_command(request, params)
    }
}

pub trait RobotStateStub: Send + Sync {
    fn get_robot_state(
        &self,
        ctx: CallContext,
        request: RobotStateRequest,
        done: Completion<RobotStateResponse>,
    );
}

/// Client for the robot state service.
#[derive(Debug)]
pub struct RobotStateClient {
    core: ClientCore,
    stub: SharedSlot<dyn RobotStateStub>,
}

impl RobotStateClient {
    pub const SERVICE_NAME: &'static str = "robot-state";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
        }
    }

    pub fn set_comms(&self, stub: Arc<dyn RobotStateStub>) {
        self.stub.set(stub);
    }

    /// Current robot state; default if the robot sent none.
    pub fn get_robot_state_async(&self, params: &RpcParameters) -> SharedFuture<RpcResult<RobotState>> {
        initiate_async_call(
            &self.core,
            self.stub.get(),
            RobotStateRequest::default(),
            params,
            |stub, ctx, request, done| stub.get_robot_state(ctx, request, done),
            |_: &RobotStateRequest, response: RobotStateResponse, transport: TransportStatus| {
                let status = leased_status(None, &transport, &response, Status::ok());
                RpcResult::new(status, response.robot_state.unwrap_or_default())
            },
        )
    }

    pub fn get_robot_state(&self, params: &RpcParameters) -> RpcResult<RobotState> {
        self.get_robot_state_async(params).wait()
    }
}
