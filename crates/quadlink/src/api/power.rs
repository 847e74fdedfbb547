// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Power service messages.

use super::{impl_request, impl_response, Lease, LeaseUseResult, RequestHeader, ResponseHeader};
use crate::status::service_status;

/// What the power command should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum PowerRequest {
    #[default]
    Unknown = 0,
    OffMotors = 1,
    OnMotors = 2,
    OffRobot = 3,
    CycleRobot = 4,
    OffPayloadPorts = 5,
    OnPayloadPorts = 6,
    OffWifiRadio = 7,
    OnWifiRadio = 8,
}

impl PowerRequest {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "REQUEST_UNKNOWN",
            Self::OffMotors => "REQUEST_OFF_MOTORS",
            Self::OnMotors => "REQUEST_ON_MOTORS",
            Self::OffRobot => "REQUEST_OFF_ROBOT",
            Self::CycleRobot => "REQUEST_CYCLE_ROBOT",
            Self::OffPayloadPorts => "REQUEST_OFF_PAYLOAD_PORTS",
            Self::OnPayloadPorts => "REQUEST_ON_PAYLOAD_PORTS",
            Self::OffWifiRadio => "REQUEST_OFF_WIFI_RADIO",
            Self::OnWifiRadio => "REQUEST_ON_WIFI_RADIO",
        }
    }
}

service_status! {
    /// Progress of a power command, shared by the command and feedback responses.
    pub enum PowerCommandStatus as "PowerCommandStatus", success = [InProgress, Success] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        InProgress = 1 => "STATUS_IN_PROGRESS",
        Success = 2 => "STATUS_SUCCESS",
        ShorePowerConnected = 3 => "STATUS_SHORE_POWER_CONNECTED",
        Overridden = 4 => "STATUS_OVERRIDDEN",
        Faulted = 5 => "STATUS_FAULTED",
        InternalError = 6 => "STATUS_INTERNAL_ERROR",
        LicenseError = 7 => "STATUS_LICENSE_ERROR",
        KeepaliveMotorDisable = 8 => "STATUS_KEEPALIVE_MOTOR_DISABLE",
    }
}

#[derive(Debug, Clone, Default)]
pub struct PowerCommandRequest {
    pub header: Option<RequestHeader>,
    pub lease: Option<Lease>,
    pub request: PowerRequest,
}

impl_request!(PowerCommandRequest, "robot.api.PowerCommandRequest");

#[derive(Debug, Clone, Default)]
pub struct PowerCommandResponse {
    pub header: Option<ResponseHeader>,
    pub lease_use_result: Option<LeaseUseResult>,
    pub status: PowerCommandStatus,
    /// Identifier for feedback requests.
    pub power_command_id: u32,
}

impl_response!(
    PowerCommandResponse,
    "robot.api.PowerCommandResponse",
    lease = lease_use_result
);

#[derive(Debug, Clone, Default)]
pub struct PowerCommandFeedbackRequest {
    pub header: Option<RequestHeader>,
    pub power_command_id: u32,
}

impl_request!(PowerCommandFeedbackRequest, "robot.api.PowerCommandFeedbackRequest");

#[derive(Debug, Clone, Default)]
pub struct PowerCommandFeedbackResponse {
    pub header: Option<ResponseHeader>,
    pub status: PowerCommandStatus,
}

impl_response!(PowerCommandFeedbackResponse, "robot.api.PowerCommandFeedbackResponse");
