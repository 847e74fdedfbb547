// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Messages carrying large opaque byte payloads.
//!
//! These are the types the strip registry knows how to shrink before a copy
//! is reflected into a response header or written to an audit log.

use super::{impl_request, impl_response, RequestHeader, ResponseHeader, Timestamp};

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub cols: u32,
    pub rows: u32,
    /// Encoding name, e.g. `"jpeg"`.
    pub format: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageCapture {
    pub acquisition_time: Option<Timestamp>,
    pub frame_name: String,
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageResponse {
    pub source_name: String,
    pub shot: Option<ImageCapture>,
}

#[derive(Debug, Clone, Default)]
pub struct GetImageResponse {
    pub header: Option<ResponseHeader>,
    pub image_responses: Vec<ImageResponse>,
}

impl_response!(GetImageResponse, "robot.api.GetImageResponse");

// ---------------------------------------------------------------------------
// Point clouds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointCloud {
    pub source_name: String,
    pub num_points: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct GetPointCloudResponse {
    pub header: Option<ResponseHeader>,
    pub point_clouds: Vec<PointCloud>,
}

impl_response!(GetPointCloudResponse, "robot.api.GetPointCloudResponse");

// ---------------------------------------------------------------------------
// Local grids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalGrid {
    pub local_grid_type_name: String,
    pub cell_count: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct GetLocalGridsResponse {
    pub header: Option<ResponseHeader>,
    pub local_grids: Vec<LocalGrid>,
}

impl_response!(GetLocalGridsResponse, "robot.api.GetLocalGridsResponse");

// ---------------------------------------------------------------------------
// Data buffer (log blobs, signal ticks)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataBlob {
    pub timestamp: Option<Timestamp>,
    pub channel: String,
    pub type_id: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordDataBlobsRequest {
    pub header: Option<RequestHeader>,
    pub blob_data: Vec<DataBlob>,
}

impl_request!(RecordDataBlobsRequest, "robot.api.RecordDataBlobsRequest");

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalTick {
    pub sequence_id: i64,
    pub source: String,
    /// Raw encoded sample values.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordSignalTicksRequest {
    pub header: Option<RequestHeader>,
    pub tick_data: Vec<SignalTick>,
}

impl_request!(RecordSignalTicksRequest, "robot.api.RecordSignalTicksRequest");

// ---------------------------------------------------------------------------
// Data acquisition store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct StoreImageRequest {
    pub header: Option<RequestHeader>,
    pub data_id: String,
    pub image: Option<ImageCapture>,
}

impl_request!(StoreImageRequest, "robot.api.StoreImageRequest");
