// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic async call dispatcher.

use super::future::{promise_pair, Promise, SharedFuture};
use super::params::{CallContext, RpcParameters};
use super::tracker::CallTracker;
use super::transport::{Completion, TransportStatus};
use super::{process_response, ClientCore, RpcResult};
use crate::api::{Request, Response};
use crate::status::{SdkErrorCode, Status};
use crate::strip;
use std::sync::Arc;

/// Start one call and return the future its completion will fulfil.
///
/// * `stub` - `None` fails fast with `Sdk/StubNotInitialized`.
/// * `start` - starts the transport call; must eventually invoke the
///   completion exactly once (dropping it fulfils the future with
///   `Sdk/GenericSdkError`).
/// * `on_complete` - turns `(request, response, transport status)` into the
///   final result.
pub fn initiate_async_call<S, Req, Rsp, Final, Start, Done>(
    core: &ClientCore,
    stub: Option<Arc<S>>,
    mut request: Req,
    params: &RpcParameters,
    start: Start,
    on_complete: Done,
) -> SharedFuture<RpcResult<Final>>
where
    S: ?Sized,
    Req: Request,
    Rsp: Response,
    Final: Clone + Default + Send + 'static,
    Start: FnOnce(&S, CallContext, Req, Completion<Rsp>),
    Done: FnOnce(&Req, Rsp, TransportStatus) -> RpcResult<Final> + Send + 'static,
{
    let (promise, future) = promise_pair();
    let rpc_name = request.type_name();

    let Some(stub) = stub else {
        log::debug!("[rpc] {} rejected: stub not initialized", rpc_name);
        promise.set_value(RpcResult::err(Status::sdk(
            SdkErrorCode::StubNotInitialized,
            format!("{} issued before set_comms", rpc_name),
        )));
        return future;
    };

    core.stamp_header(&mut request);
    let ctx = core
        .tracker()
        .begin(rpc_name, params, core.default_timeout());

    log::debug!(
        "[rpc] start {} call={} tag={:?} timeout={:?}",
        rpc_name,
        ctx.call_id,
        ctx.logging_tag,
        ctx.timeout
    );
    if params.log_requests || core.log_requests() {
        log::trace!(
            "[rpc] call={} request={:?}",
            ctx.call_id,
            strip::stripped_copy(&request)
        );
    }

    let pending = PendingCall {
        promise: Some(promise),
        tracker: Arc::clone(core.tracker()),
        call_id: ctx.call_id,
        rpc_name,
    };
    let kept = request.clone();
    let completion: Completion<Rsp> = Box::new(move |transport, response| {
        let result = on_complete(&kept, response, transport);
        pending.complete(result);
    });

    start(&*stub, ctx, request, completion);
    future
}

/// [`initiate_async_call`] for calls whose result is the response itself and
/// whose only failure sources are the transport and the header.
pub fn initiate_simple_call<S, Req, Rsp, Start>(
    core: &ClientCore,
    stub: Option<Arc<S>>,
    request: Req,
    params: &RpcParameters,
    start: Start,
) -> SharedFuture<RpcResult<Rsp>>
where
    S: ?Sized,
    Req: Request,
    Rsp: Response,
    Start: FnOnce(&S, CallContext, Req, Completion<Rsp>),
{
    initiate_async_call(
        core,
        stub,
        request,
        params,
        start,
        |_request: &Req, response: Rsp, transport: TransportStatus| {
            let status = process_response(&transport, &response, Status::ok());
            RpcResult::new(status, response)
        },
    )
}

/// Promise plus tracker entry of one call.
struct PendingCall<Final: Default> {
    promise: Option<Promise<RpcResult<Final>>>,
    tracker: Arc<CallTracker>,
    call_id: u64,
    rpc_name: &'static str,
}

impl<Final: Default> PendingCall<Final> {
    fn complete(mut self, result: RpcResult<Final>) {
        let elapsed = self.tracker.finish(self.call_id).map(|r| r.started.elapsed());
        log::debug!(
            "[rpc] done {} call={} status={} elapsed={:?}",
            self.rpc_name,
            self.call_id,
            result.status,
            elapsed
        );
        if let Some(promise) = self.promise.take() {
            promise.set_value(result);
        }
    }
}

impl<Final: Default> Drop for PendingCall<Final> {
    fn drop(&mut self) {
        let Some(promise) = self.promise.take() else {
            return;
        };
        self.tracker.finish(self.call_id);
        log::warn!(
            "[rpc] {} call={} dropped without completing",
            self.rpc_name,
            self.call_id
        );
        promise.set_value(RpcResult::err(Status::sdk(
            SdkErrorCode::GenericSdkError,
            format!("{} completion dropped by transport", self.rpc_name),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::directory::{
        ListServiceEntriesRequest, ListServiceEntriesResponse, ServiceEntry,
    };
    use crate::api::{CommonErrorCode, ResponseHeader};
    use crate::status::{Condition, TransportCode};
    use crate::time::ManualClock;
    use parking_lot::Mutex;
    use std::thread;
    use std::time::Duration;

    /// Stub answering on its own thread with a canned outcome.
    struct EchoStub {
        outcome: TransportStatus,
        header_code: CommonErrorCode,
        seen: Mutex<Vec<ListServiceEntriesRequest>>,
    }

    impl EchoStub {
        fn new(outcome: TransportStatus, header_code: CommonErrorCode) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                header_code,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn list(
            &self,
            _ctx: CallContext,
            request: ListServiceEntriesRequest,
            done: Completion<ListServiceEntriesResponse>,
        ) {
            self.seen.lock().push(request);
            let outcome = self.outcome.clone();
            let response = ListServiceEntriesResponse {
                header: Some(ResponseHeader::with_code(self.header_code)),
                service_entries: vec![ServiceEntry::new("time-sync")],
            };
            thread::spawn(move || done(outcome, response));
        }
    }

    fn core() -> ClientCore {
        ClientCore::new("dispatch-test", ManualClock::shared(1_000_000_000))
    }

    fn list(
        core: &ClientCore,
        stub: Option<Arc<EchoStub>>,
    ) -> SharedFuture<RpcResult<ListServiceEntriesResponse>> {
        initiate_simple_call(
            core,
            stub,
            ListServiceEntriesRequest::default(),
            &RpcParameters::default().with_logging_tag("test"),
            |stub: &EchoStub, ctx, request, done| stub.list(ctx, request, done),
        )
    }

    #[test]
    fn test_missing_stub_fails_fast() {
        let result = list(&core(), None).wait();
        assert!(result.status == Condition::SdkError);
        assert_eq!(result.status.code(), SdkErrorCode::StubNotInitialized as i32);
        assert!(result.response.service_entries.is_empty());
    }

    #[test]
    fn test_success_fulfils_future() {
        let core = core();
        let stub = EchoStub::new(TransportStatus::ok(), CommonErrorCode::Ok);
        let result = list(&core, Some(Arc::clone(&stub))).wait();
        assert!(result.is_ok());
        assert_eq!(result.response.service_entries.len(), 1);
        assert!(core.tracker().is_empty());

        let seen = stub.seen.lock();
        let header = seen[0].header.as_ref().unwrap();
        assert_eq!(header.client_name, "dispatch-test");
        assert!(header.request_timestamp.is_some());
    }

    #[test]
    fn test_transport_failure_lifted() {
        let stub = EchoStub::new(
            TransportStatus::retryable(TransportCode::Unavailable, "no route"),
            CommonErrorCode::Ok,
        );
        let result = list(&core(), Some(stub)).wait();
        assert!(result.status == Condition::Retryable);
    }

    #[test]
    fn test_header_error_surfaces() {
        let stub = EchoStub::new(TransportStatus::ok(), CommonErrorCode::InternalServerError);
        let result = list(&core(), Some(stub)).wait();
        assert!(result.status == Condition::ResponseError);
        assert_eq!(
            result.status.code(),
            CommonErrorCode::InternalServerError as i32
        );
    }

    #[test]
    fn test_dropped_completion_fulfils_with_error() {
        let core = core();
        let future: SharedFuture<RpcResult<ListServiceEntriesResponse>> = initiate_simple_call(
            &core,
            Some(Arc::new(())),
            ListServiceEntriesRequest::default(),
            &RpcParameters::default(),
            |_: &(), _ctx, _request, done| drop(done),
        );
        let result = future.wait_for(Duration::from_secs(1)).unwrap();
        assert_eq!(result.status.code(), SdkErrorCode::GenericSdkError as i32);
        assert!(core.tracker().is_empty());
    }

    #[test]
    fn test_custom_completion_maps_final_type() {
        let stub = EchoStub::new(TransportStatus::ok(), CommonErrorCode::Ok);
        let future = initiate_async_call(
            &core(),
            Some(stub),
            ListServiceEntriesRequest::default(),
            &RpcParameters::default(),
            |stub: &EchoStub, ctx, request, done| stub.list(ctx, request, done),
            |request: &ListServiceEntriesRequest,
             response: ListServiceEntriesResponse,
             transport: TransportStatus| {
                assert!(request.header.is_some());
                let status = process_response(&transport, &response, Status::ok());
                RpcResult::new(status, response.service_entries.len())
            },
        );
        assert_eq!(future.wait().into_result(), Ok(1));
    }
}
