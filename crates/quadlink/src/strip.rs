// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Payload stripping for reflected and logged message copies.
//!
//! A [`StripRegistry`] maps a message type name to a function that clears the
//! large opaque byte fields of that type in place. Stripping only ever
//! destroys listed byte fields; it never adds or rewrites anything else, and
//! types without an entry pass through untouched.
//!
//! Callers strip a *copy* ([`StripRegistry::stripped_copy`]) before embedding
//! it in a response header or an audit line; the message actually sent or
//! received is never modified.

use crate::api::graph_nav::{DownloadWaypointSnapshotResponse, UploadWaypointSnapshotRequest};
use crate::api::payload::{
    GetImageResponse, GetLocalGridsResponse, GetPointCloudResponse, ImageCapture,
    RecordDataBlobsRequest, RecordSignalTicksRequest, StoreImageRequest,
};
use crate::api::{Message, NamedMessage};
use std::any::Any;
use std::collections::HashMap;
use std::sync::OnceLock;

type Stripper = Box<dyn Fn(&mut dyn Any) -> bool + Send + Sync>;

/// Registry of per-type stripping functions.
pub struct StripRegistry {
    strippers: HashMap<&'static str, Stripper>,
}

impl StripRegistry {
    /// Registry with no entries; every message passes through unchanged.
    pub fn empty() -> Self {
        Self {
            strippers: HashMap::new(),
        }
    }

    /// Registry covering every large-payload message in [`crate::api`].
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register::<GetImageResponse>(strip_image_response);
        registry.register::<GetPointCloudResponse>(strip_point_cloud_response);
        registry.register::<GetLocalGridsResponse>(strip_local_grids_response);
        registry.register::<UploadWaypointSnapshotRequest>(strip_upload_snapshot);
        registry.register::<DownloadWaypointSnapshotResponse>(strip_download_snapshot);
        registry.register::<RecordDataBlobsRequest>(strip_data_blobs);
        registry.register::<RecordSignalTicksRequest>(strip_signal_ticks);
        registry.register::<StoreImageRequest>(strip_store_image);
        registry
    }

    /// Register (or replace) the stripping function for `M`.
    pub fn register<M: NamedMessage>(&mut self, strip: fn(&mut M)) {
        let stripper: Stripper = Box::new(move |any: &mut dyn Any| match any.downcast_mut::<M>() {
            Some(message) => {
                strip(message);
                true
            }
            None => false,
        });
        self.strippers.insert(M::TYPE_NAME, stripper);
    }

    /// True if `type_name` has an entry.
    pub fn covers(&self, type_name: &str) -> bool {
        self.strippers.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.strippers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.strippers.is_empty()
    }

    /// Clear the large byte fields of `message` in place.
    ///
    /// Returns true iff an entry matched the message's runtime type.
    pub fn strip(&self, message: &mut dyn Message) -> bool {
        match self.strippers.get(message.type_name()) {
            Some(stripper) => stripper(message.as_any_mut()),
            None => false,
        }
    }

    /// Copy of `message` with its large byte fields cleared.
    pub fn stripped_copy<M: Message + Clone>(&self, message: &M) -> M {
        let mut copy = message.clone();
        self.strip(&mut copy);
        copy
    }
}

impl Default for StripRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Process-wide registry built from [`StripRegistry::standard`].
pub fn standard_registry() -> &'static StripRegistry {
    static REGISTRY: OnceLock<StripRegistry> = OnceLock::new();
    REGISTRY.get_or_init(StripRegistry::standard)
}

/// Strip `message` with the standard registry.
pub fn strip_large_byte_fields(message: &mut dyn Message) -> bool {
    standard_registry().strip(message)
}

/// Stripped copy of `message` using the standard registry.
pub fn stripped_copy<M: Message + Clone>(message: &M) -> M {
    standard_registry().stripped_copy(message)
}

fn clear_capture(capture: Option<&mut ImageCapture>) {
    if let Some(image) = capture.and_then(|shot| shot.image.as_mut()) {
        image.data.clear();
    }
}

fn strip_image_response(message: &mut GetImageResponse) {
    for response in &mut message.image_responses {
        clear_capture(response.shot.as_mut());
    }
}

fn strip_point_cloud_response(message: &mut GetPointCloudResponse) {
    for cloud in &mut message.point_clouds {
        cloud.data.clear();
    }
}

fn strip_local_grids_response(message: &mut GetLocalGridsResponse) {
    for grid in &mut message.local_grids {
        grid.data.clear();
    }
}

fn strip_upload_snapshot(message: &mut UploadWaypointSnapshotRequest) {
    if let Some(chunk) = message.chunk.as_mut() {
        chunk.data.clear();
    }
}

fn strip_download_snapshot(message: &mut DownloadWaypointSnapshotResponse) {
    if let Some(chunk) = message.chunk.as_mut() {
        chunk.data.clear();
    }
}

fn strip_data_blobs(message: &mut RecordDataBlobsRequest) {
    for blob in &mut message.blob_data {
        blob.data.clear();
    }
}

fn strip_signal_ticks(message: &mut RecordSignalTicksRequest) {
    for tick in &mut message.tick_data {
        tick.data.clear();
    }
}

fn strip_store_image(message: &mut StoreImageRequest) {
    clear_capture(message.image.as_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::graph_nav::DataChunk;
    use crate::api::payload::{DataBlob, Image, ImageResponse, PointCloud};
    use crate::api::power::PowerCommandRequest;
    use crate::api::Timestamp;

    fn image_response() -> GetImageResponse {
        GetImageResponse {
            header: None,
            image_responses: vec![ImageResponse {
                source_name: "frontleft_fisheye".to_string(),
                shot: Some(ImageCapture {
                    acquisition_time: Some(Timestamp::new(10, 5)),
                    frame_name: "frontleft".to_string(),
                    image: Some(Image {
                        cols: 640,
                        rows: 480,
                        format: "jpeg".to_string(),
                        data: vec![0xFF; 4096],
                    }),
                }),
            }],
        }
    }

    #[test]
    fn strips_only_image_bytes() {
        let mut message = image_response();
        assert!(strip_large_byte_fields(&mut message));

        let shot = message.image_responses[0].shot.as_ref().unwrap();
        let image = shot.image.as_ref().unwrap();
        assert!(image.data.is_empty());
        assert_eq!(image.cols, 640);
        assert_eq!(image.rows, 480);
        assert_eq!(image.format, "jpeg");
        assert_eq!(shot.frame_name, "frontleft");
        assert_eq!(shot.acquisition_time, Some(Timestamp::new(10, 5)));
        assert_eq!(message.image_responses[0].source_name, "frontleft_fisheye");
    }

    #[test]
    fn stripped_copy_leaves_original() {
        let original = image_response();
        let copy = stripped_copy(&original);

        let original_bytes = &original.image_responses[0]
            .shot
            .as_ref()
            .unwrap()
            .image
            .as_ref()
            .unwrap()
            .data;
        assert_eq!(original_bytes.len(), 4096);
        let copied = &copy.image_responses[0].shot.as_ref().unwrap().image;
        assert!(copied.as_ref().unwrap().data.is_empty());
    }

    #[test]
    fn unknown_type_passes_through() {
        let mut message = PowerCommandRequest::default();
        assert!(!strip_large_byte_fields(&mut message));
        assert!(!standard_registry().covers("robot.api.PowerCommandRequest"));
    }

    #[test]
    fn standard_registry_covers_payload_types() {
        let registry = StripRegistry::standard();
        assert_eq!(registry.len(), 8);
        for name in [
            "robot.api.GetImageResponse",
            "robot.api.GetPointCloudResponse",
            "robot.api.GetLocalGridsResponse",
            "robot.api.graph_nav.UploadWaypointSnapshotRequest",
            "robot.api.graph_nav.DownloadWaypointSnapshotResponse",
            "robot.api.RecordDataBlobsRequest",
            "robot.api.RecordSignalTicksRequest",
            "robot.api.StoreImageRequest",
        ] {
            assert!(registry.covers(name), "missing {}", name);
        }
    }

    #[test]
    fn chunk_and_blob_stripping() {
        let mut upload = UploadWaypointSnapshotRequest {
            chunk: Some(DataChunk {
                total_size: 1_000_000,
                data: vec![1; 512],
            }),
            ..Default::default()
        };
        assert!(strip_large_byte_fields(&mut upload));
        let chunk = upload.chunk.unwrap();
        assert!(chunk.data.is_empty());
        assert_eq!(chunk.total_size, 1_000_000);

        let mut blobs = RecordDataBlobsRequest {
            header: None,
            blob_data: vec![DataBlob {
                channel: "logs".to_string(),
                type_id: "text".to_string(),
                data: vec![7; 64],
                ..Default::default()
            }],
        };
        assert!(strip_large_byte_fields(&mut blobs));
        assert!(blobs.blob_data[0].data.is_empty());
        assert_eq!(blobs.blob_data[0].channel, "logs");
    }

    #[test]
    fn point_cloud_keeps_point_count() {
        let mut message = GetPointCloudResponse {
            header: None,
            point_clouds: vec![PointCloud {
                source_name: "lidar".to_string(),
                num_points: 3,
                data: vec![0; 36],
            }],
        };
        assert!(strip_large_byte_fields(&mut message));
        assert_eq!(message.point_clouds[0].num_points, 3);
        assert!(message.point_clouds[0].data.is_empty());
    }

    #[test]
    fn empty_registry_strips_nothing() {
        let registry = StripRegistry::empty();
        let mut message = image_response();
        assert!(registry.is_empty());
        assert!(!registry.strip(&mut message));
        assert_eq!(
            message.image_responses[0]
                .shot
                .as_ref()
                .unwrap()
                .image
                .as_ref()
                .unwrap()
                .data
                .len(),
            4096
        );
    }

    #[test]
    fn custom_registration() {
        fn strip_power(_: &mut PowerCommandRequest) {}
        let mut registry = StripRegistry::empty();
        registry.register::<PowerCommandRequest>(strip_power);
        let mut message = PowerCommandRequest::default();
        assert!(registry.strip(&mut message));
    }
}
