// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Directory service client.

use super::ServiceDirectory;
use crate::api::directory::{
    GetServiceEntryRequest, GetServiceEntryResponse, ListServiceEntriesRequest,
    ListServiceEntriesResponse, ServiceEntry,
};
use crate::rpc::{
    initiate_async_call, process_response, CallContext, ClientCore, Completion, RpcParameters,
    RpcResult, SharedFuture, SharedSlot, TransportStatus,
};
use crate::status::Status;
use std::sync::Arc;

/// Transport surface of the directory service.
pub trait DirectoryStub: Send + Sync {
    fn list_service_entries(
        &self,
        ctx: CallContext,
        request: ListServiceEntriesRequest,
        done: Completion<ListServiceEntriesResponse>,
    );

    fn get_service_entry(
        &self,
        ctx: CallContext,
        request: GetServiceEntryRequest,
        done: Completion<GetServiceEntryResponse>,
    );
}

/// Client for the robot's service directory.
#[derive(Debug)]
pub struct DirectoryClient {
    core: ClientCore,
    stub: SharedSlot<dyn DirectoryStub>,
    params: RpcParameters,
}

impl DirectoryClient {
    pub const SERVICE_NAME: &'static str = "directory";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
            params: RpcParameters::default().with_logging_tag("directory"),
        }
    }

    pub fn set_comms(&self, stub: Arc<dyn DirectoryStub>) {
        self.stub.set(stub);
    }

    /// All registered entries.
    pub fn list_service_entries_async(
        &self,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<Vec<ServiceEntry>>> {
        initiate_async_call(
            &self.core,
            self.stub.get(),
            ListServiceEntriesRequest::default(),
            params,
            |stub, ctx, request, done| stub.list_service_entries(ctx, request, done),
            |_: &ListServiceEntriesRequest,
             response: ListServiceEntriesResponse,
             transport: TransportStatus| {
                let status = process_response(&transport, &response, Status::ok());
                RpcResult::new(status, response.service_entries)
            },
        )
    }

    pub fn list_service_entries(&self, params: &RpcParameters) -> RpcResult<Vec<ServiceEntry>> {
        self.list_service_entries_async(params).wait()
    }

    /// Entry registered under `service_name`.
    pub fn get_service_entry_async(
        &self,
        service_name: &str,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<ServiceEntry>> {
        let request = GetServiceEntryRequest {
            header: None,
            service_name: service_name.to_string(),
        };
        initiate_async_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.get_service_entry(ctx, request, done),
            |_: &GetServiceEntryRequest,
             response: GetServiceEntryResponse,
             transport: TransportStatus| {
                let status = process_response(&transport, &response, response.status.status());
                RpcResult::new(status, response.service_entry.unwrap_or_default())
            },
        )
    }

    pub fn get_service_entry(
        &self,
        service_name: &str,
        params: &RpcParameters,
    ) -> RpcResult<ServiceEntry> {
        self.get_service_entry_async(service_name, params).wait()
    }
}

impl ServiceDirectory for DirectoryClient {
    fn list_services(&self) -> RpcResult<Vec<ServiceEntry>> {
        self.list_service_entries(&self.params)
    }
}
