// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Graph-navigation messages the core needs: status tables and snapshot chunks.

use super::{impl_request, impl_response, Lease, RequestHeader, ResponseHeader};
use crate::status::service_status;

service_status! {
    /// Clear-graph outcome. Both the unset value and `STATUS_OK` count as success.
    pub enum ClearGraphStatus as "ClearGraphResponse_Status", success = [Unknown, Ok] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        Ok = 1 => "STATUS_OK",
        RecordingActive = 2 => "STATUS_RECORDING_ACTIVE",
    }
}

service_status! {
    /// Set-localization outcome.
    pub enum SetLocalizationStatus as "SetLocalizationResponse_Status", success = [Ok] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        Ok = 1 => "STATUS_OK",
        RobotImpaired = 2 => "STATUS_ROBOT_IMPAIRED",
        UnknownWaypoint = 3 => "STATUS_UNKNOWN_WAYPOINT",
        Aborted = 4 => "STATUS_ABORTED",
        Failed = 5 => "STATUS_FAILED",
        FiducialTooFarAway = 6 => "STATUS_FIDUCIAL_TOO_FAR_AWAY",
        FiducialTooOld = 7 => "STATUS_FIDUCIAL_TOO_OLD",
        NoMatchingFiducial = 8 => "STATUS_NO_MATCHING_FIDUCIAL",
        FiducialPoseUncertain = 9 => "STATUS_FIDUCIAL_POSE_UNCERTAIN",
        IncompatibleSensors = 10 => "STATUS_INCOMPATIBLE_SENSORS",
        VisualAlignmentFailed = 11 => "STATUS_VISUAL_ALIGNMENT_FAILED",
        NoDataInRegion = 12 => "STATUS_NO_DATA_IN_REGION",
        Ambiguous = 13 => "STATUS_AMBIGUOUS",
    }
}

/// Piece of a large serialized blob sent over several messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataChunk {
    /// Size of the whole blob.
    pub total_size: u64,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadWaypointSnapshotRequest {
    pub header: Option<RequestHeader>,
    pub lease: Option<Lease>,
    pub chunk: Option<DataChunk>,
}

impl_request!(UploadWaypointSnapshotRequest, "robot.api.graph_nav.UploadWaypointSnapshotRequest");

#[derive(Debug, Clone, Default)]
pub struct DownloadWaypointSnapshotResponse {
    pub header: Option<ResponseHeader>,
    pub waypoint_snapshot_id: String,
    pub chunk: Option<DataChunk>,
}

impl_response!(
    DownloadWaypointSnapshotResponse,
    "robot.api.graph_nav.DownloadWaypointSnapshotResponse"
);
