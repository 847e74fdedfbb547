// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Robot state service messages (power portion).

use super::{impl_request, impl_response, RequestHeader, ResponseHeader, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum MotorPowerState {
    #[default]
    Unknown = 0,
    Off = 1,
    On = 2,
    PoweringOn = 3,
    PoweringOff = 4,
    Error = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ShorePowerState {
    #[default]
    Unknown = 0,
    On = 1,
    Off = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerState {
    pub timestamp: Option<Timestamp>,
    pub motor_power_state: MotorPowerState,
    pub shore_power_state: ShorePowerState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RobotState {
    pub power_state: Option<PowerState>,
}

impl RobotState {
    /// Motor power state, `Unknown` if the robot did not report power.
    pub fn motor_power_state(&self) -> MotorPowerState {
        self.power_state
            .map(|p| p.motor_power_state)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RobotStateRequest {
    pub header: Option<RequestHeader>,
}

impl_request!(RobotStateRequest, "robot.api.RobotStateRequest");

#[derive(Debug, Clone, Default)]
pub struct RobotStateResponse {
    pub header: Option<ResponseHeader>,
    pub robot_state: Option<RobotState>,
}

impl_response!(RobotStateResponse, "robot.api.RobotStateResponse");
