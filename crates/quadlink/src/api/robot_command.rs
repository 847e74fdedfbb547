// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Robot command service messages (the subset the core issues).

use super::{
    impl_request, impl_response, Lease, LeaseUseResult, RequestHeader, ResponseHeader, Timestamp,
};
use crate::status::service_status;

/// Full-body command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RobotCommand {
    /// Sit down if standing, then cut motor power.
    #[default]
    SafePowerOff,
    /// Stop in place.
    Stop,
    SelfRight,
}

service_status! {
    /// Acceptance status of a robot command.
    pub enum RobotCommandStatus as "RobotCommandResponse_Status", success = [Ok] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        Ok = 1 => "STATUS_OK",
        InvalidRequest = 2 => "STATUS_INVALID_REQUEST",
        Unsupported = 3 => "STATUS_UNSUPPORTED",
        NoTimesync = 4 => "STATUS_NO_TIMESYNC",
        Expired = 5 => "STATUS_EXPIRED",
        TooDistant = 6 => "STATUS_TOO_DISTANT",
        NotPoweredOn = 7 => "STATUS_NOT_POWERED_ON",
        BehaviorFault = 9 => "STATUS_BEHAVIOR_FAULT",
        Docked = 10 => "STATUS_DOCKED",
        UnknownFrame = 11 => "STATUS_UNKNOWN_FRAME",
    }
}

#[derive(Debug, Clone, Default)]
pub struct RobotCommandRequest {
    pub header: Option<RequestHeader>,
    pub lease: Option<Lease>,
    pub command: RobotCommand,
    /// Time-sync session the end time refers to.
    pub clock_identifier: String,
    /// Robot-time expiry of the command, if any.
    pub end_time: Option<Timestamp>,
}

impl_request!(RobotCommandRequest, "robot.api.RobotCommandRequest");

#[derive(Debug, Clone, Default)]
pub struct RobotCommandResponse {
    pub header: Option<ResponseHeader>,
    pub lease_use_result: Option<LeaseUseResult>,
    pub status: RobotCommandStatus,
    /// Human readable detail for failures.
    pub message: String,
    pub robot_command_id: u32,
}

impl_response!(
    RobotCommandResponse,
    "robot.api.RobotCommandResponse",
    lease = lease_use_result
);
