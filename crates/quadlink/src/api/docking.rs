// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Docking service messages.

use super::{
    impl_request, impl_response, Lease, LeaseUseResult, RequestHeader, ResponseHeader, Timestamp,
};
use crate::status::service_status;

/// How far the docking maneuver should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum PrepPoseBehavior {
    #[default]
    Unknown = 0,
    /// Go to the prep pose, then dock.
    Default = 1,
    /// Dock without stopping at the prep pose.
    SkipPose = 2,
    /// Stop at the prep pose.
    OnlyPose = 3,
    /// Leave the dock.
    Undock = 4,
}

service_status! {
    /// Acceptance status of a docking command.
    pub enum DockingCommandStatus as "DockingCommandResponse_Status", success = [Ok] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        Ok = 1 => "STATUS_OK",
        ErrorLease = 4 => "STATUS_ERROR_LEASE",
        ErrorDockNotFound = 5 => "STATUS_ERROR_DOCK_NOT_FOUND",
        ErrorNotDocked = 6 => "STATUS_ERROR_NOT_DOCKED",
        ErrorGripperHoldingItem = 8 => "STATUS_ERROR_GRIPPER_HOLDING_ITEM",
        ErrorNotAvailable = 9 => "STATUS_ERROR_NOT_AVAILABLE",
        ErrorSystem = 7 => "STATUS_ERROR_SYSTEM",
    }
}

service_status! {
    /// Progress of a docking command.
    pub enum DockingFeedbackStatus as "DockingCommandFeedbackResponse_Status",
        success = [InProgress, Docked, AtPrepPose, Undocked]
    {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        InProgress = 1 => "STATUS_IN_PROGRESS",
        Docked = 2 => "STATUS_DOCKED",
        ErrorDockLost = 3 => "STATUS_ERROR_DOCK_LOST",
        ErrorLease = 4 => "STATUS_ERROR_LEASE",
        ErrorCommandTimedOut = 5 => "STATUS_ERROR_COMMAND_TIMED_OUT",
        ErrorNoTimesync = 6 => "STATUS_ERROR_NO_TIMESYNC",
        ErrorTooDistant = 7 => "STATUS_ERROR_TOO_DISTANT",
        ErrorSystem = 8 => "STATUS_ERROR_SYSTEM",
        Undocked = 10 => "STATUS_UNDOCKED",
        AtPrepPose = 11 => "STATUS_AT_PREP_POSE",
        ErrorNotAvailable = 12 => "STATUS_ERROR_NOT_AVAILABLE",
        ErrorStuck = 14 => "STATUS_ERROR_STUCK",
    }
}

#[derive(Debug, Clone, Default)]
pub struct DockingCommandRequest {
    pub header: Option<RequestHeader>,
    pub lease: Option<Lease>,
    pub docking_station_id: u32,
    /// Time-sync session the end time refers to.
    pub clock_identifier: String,
    /// Robot-time deadline for the maneuver.
    pub end_time: Option<Timestamp>,
    pub prep_pose_behavior: PrepPoseBehavior,
}

impl_request!(DockingCommandRequest, "robot.api.DockingCommandRequest");

#[derive(Debug, Clone, Default)]
pub struct DockingCommandResponse {
    pub header: Option<ResponseHeader>,
    pub lease_use_result: Option<LeaseUseResult>,
    pub status: DockingCommandStatus,
    pub docking_command_id: u32,
}

impl_response!(
    DockingCommandResponse,
    "robot.api.DockingCommandResponse",
    lease = lease_use_result
);

#[derive(Debug, Clone, Default)]
pub struct DockingCommandFeedbackRequest {
    pub header: Option<RequestHeader>,
    pub docking_command_id: u32,
}

impl_request!(DockingCommandFeedbackRequest, "robot.api.DockingCommandFeedbackRequest");

#[derive(Debug, Clone, Default)]
pub struct DockingCommandFeedbackResponse {
    pub header: Option<ResponseHeader>,
    pub lease_use_result: Option<LeaseUseResult>,
    pub status: DockingFeedbackStatus,
}

impl_response!(
    DockingCommandFeedbackResponse,
    "robot.api.DockingCommandFeedbackResponse",
    lease = lease_use_result
);
