// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Directory service messages.

use super::{impl_request, impl_response, RequestHeader, ResponseHeader};
use crate::status::service_status;

/// One registered service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceEntry {
    /// Unique service name, e.g. `"time-sync"`.
    pub name: String,
    /// Service type, e.g. `"robot.api.TimeSyncService"`.
    pub service_type: String,
    /// Authority used to route calls.
    pub authority: String,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListServiceEntriesRequest {
    pub header: Option<RequestHeader>,
}

impl_request!(ListServiceEntriesRequest, "robot.api.ListServiceEntriesRequest");

#[derive(Debug, Clone, Default)]
pub struct ListServiceEntriesResponse {
    pub header: Option<ResponseHeader>,
    pub service_entries: Vec<ServiceEntry>,
}

impl_response!(ListServiceEntriesResponse, "robot.api.ListServiceEntriesResponse");

#[derive(Debug, Clone, Default)]
pub struct GetServiceEntryRequest {
    pub header: Option<RequestHeader>,
    pub service_name: String,
}

impl_request!(GetServiceEntryRequest, "robot.api.GetServiceEntryRequest");

service_status! {
    /// Outcome of a single-entry lookup.
    pub enum GetServiceEntryStatus as "GetServiceEntryResponse_Status", success = [Ok] {
        #[default]
        Unknown = 0 => "STATUS_UNKNOWN",
        Ok = 1 => "STATUS_OK",
        NonexistentService = 2 => "STATUS_NONEXISTENT_SERVICE",
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetServiceEntryResponse {
    pub header: Option<ResponseHeader>,
    pub status: GetServiceEntryStatus,
    pub service_entry: Option<ServiceEntry>,
}

impl_response!(GetServiceEntryResponse, "robot.api.GetServiceEntryResponse");
