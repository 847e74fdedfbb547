// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time-sync service client.

use crate::api::time_sync::{TimeSyncUpdateRequest, TimeSyncUpdateResponse};
use crate::rpc::{
    initiate_simple_call, CallContext, ClientCore, Completion, RpcParameters, RpcResult,
    SharedFuture, SharedSlot,
};
use std::sync::Arc;

/// Transport surface of the time-sync service.
pub trait TimeSyncStub: Send + Sync {
    fn time_sync_update(
        &self,
        ctx: CallContext,
        request: TimeSyncUpdateRequest,
        done: Completion<TimeSyncUpdateResponse>,
    );
}

/// Client for the time-sync service.
#[derive(Debug)]
pub struct TimeSyncClient {
    core: ClientCore,
    stub: SharedSlot<dyn TimeSyncStub>,
}

impl TimeSyncClient {
    /// Default service name in the robot directory.
    pub const SERVICE_NAME: &'static str = "time-sync";

    pub fn new(core: ClientCore) -> Self {
        Self {
            core,
            stub: SharedSlot::empty(),
        }
    }

    /// Install the transport stub.
    pub fn set_comms(&self, stub: Arc<dyn TimeSyncStub>) {
        self.stub.set(stub);
    }

    pub fn core(&self) -> &ClientCore {
        &self.core
    }

    pub fn time_sync_update_async(
        &self,
        request: TimeSyncUpdateRequest,
        params: &RpcParameters,
    ) -> SharedFuture<RpcResult<TimeSyncUpdateResponse>> {
        initiate_simple_call(
            &self.core,
            self.stub.get(),
            request,
            params,
            |stub, ctx, request, done| stub.time_sync_update(ctx, request, done),
        )
    }

    pub fn time_sync_update(
        &self,
        request: TimeSyncUpdateRequest,
        params: &RpcParameters,
    ) -> RpcResult<TimeSyncUpdateResponse> {
        self.time_sync_update_async(request, params).wait()
    }
}
