// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Call execution.
//!
//! Every service client funnels its calls through
//! [`dispatch::initiate_async_call`]: the request header is stamped, the call
//! is registered with the [`CallTracker`], the stub starts the transport call
//! with a one-shot [`Completion`], and the completion post-processes the
//! response into an [`RpcResult`] that fulfils the caller's [`SharedFuture`].
//! Blocking calls are the async call followed by [`SharedFuture::wait`].

pub mod dispatch;
mod future;
mod params;
pub mod response;
mod tracker;
mod transport;

pub use dispatch::{initiate_async_call, initiate_simple_call};
pub use future::{promise_pair, Promise, SharedFuture};
pub use params::{CallContext, RetryPolicy, RpcParameters};
pub use response::{process_response, process_response_with_lease};
pub use tracker::{CallRecord, CallTracker};
pub use transport::{Completion, TransportStatus};

use crate::api::{Request, RequestHeader};
use crate::config::SdkConfig;
use crate::status::Status;
use crate::time::SharedClock;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Status plus the (possibly default) response it describes.
///
/// On failure the response may be default or partially populated; branch on
/// `status` first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcResult<T> {
    pub status: Status,
    pub response: T,
}

impl<T> RpcResult<T> {
    pub fn new(status: Status, response: T) -> Self {
        Self { status, response }
    }

    /// Successful result.
    pub fn ok(response: T) -> Self {
        Self::new(Status::ok(), response)
    }

    /// Failed result carrying a default response.
    pub fn err(status: Status) -> Self
    where
        T: Default,
    {
        Self::new(status, T::default())
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// `Ok(response)` iff the status is truthy.
    pub fn into_result(self) -> Result<T, Status> {
        if self.status.is_ok() {
            Ok(self.response)
        } else {
            Err(self.status)
        }
    }

    /// Map the response, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcResult<U> {
        RpcResult {
            status: self.status,
            response: f(self.response),
        }
    }
}

/// State shared by every client created for one robot session.
#[derive(Debug, Clone)]
pub struct ClientCore {
    client_name: String,
    clock: SharedClock,
    default_timeout: Option<Duration>,
    log_requests: bool,
    tracker: Arc<CallTracker>,
}

impl ClientCore {
    pub fn new(client_name: impl Into<String>, clock: SharedClock) -> Self {
        Self {
            client_name: client_name.into(),
            clock,
            default_timeout: None,
            log_requests: false,
            tracker: Arc::new(CallTracker::new()),
        }
    }

    /// Core using the client name, default timeout and request logging of `config`.
    pub fn from_config(config: &SdkConfig, clock: SharedClock) -> Self {
        Self {
            client_name: config.client_name.clone(),
            clock,
            default_timeout: Some(config.rpc.default_timeout()),
            log_requests: config.rpc.log_requests,
            tracker: Arc::new(CallTracker::new()),
        }
    }

    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    pub fn log_requests(&self) -> bool {
        self.log_requests
    }

    pub fn tracker(&self) -> &Arc<CallTracker> {
        &self.tracker
    }

    /// Fill in the client name and request timestamp where absent.
    pub fn stamp_header<Req: Request>(&self, request: &mut Req) {
        let header = request.header_mut().get_or_insert_with(RequestHeader::default);
        if header.client_name.is_empty() {
            header.client_name.clone_from(&self.client_name);
        }
        if header.request_timestamp.is_none() {
            header.request_timestamp = Some(self.clock.now_timestamp());
        }
    }
}

/// Stub installed once by `set_comms` and read on every call.
pub struct SharedSlot<S: ?Sized> {
    stub: RwLock<Option<Arc<S>>>,
}

impl<S: ?Sized> SharedSlot<S> {
    pub fn empty() -> Self {
        Self {
            stub: RwLock::new(None),
        }
    }

    pub fn set(&self, stub: Arc<S>) {
        *self.stub.write() = Some(stub);
    }

    pub fn get(&self) -> Option<Arc<S>> {
        self.stub.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.stub.read().is_some()
    }
}

impl<S: ?Sized> Default for SharedSlot<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: ?Sized> std::fmt::Debug for SharedSlot<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSlot").field("set", &self.is_set()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::power::PowerCommandRequest;
    use crate::api::Timestamp;
    use crate::status::{Condition, SdkErrorCode};
    use crate::time::ManualClock;

    #[test]
    fn test_into_result() {
        assert_eq!(RpcResult::ok(5).into_result(), Ok(5));
        let failed: RpcResult<u32> = RpcResult::err(Status::sdk(SdkErrorCode::InvalidArgument, ""));
        assert!(failed.status == Condition::SdkError);
        assert_eq!(failed.response, 0);
        assert!(failed.into_result().is_err());
    }

    #[test]
    fn test_stamp_header_fills_missing_fields() {
        let core = ClientCore::new("tester", ManualClock::shared(3_000_000_004));
        let mut request = PowerCommandRequest::default();
        core.stamp_header(&mut request);
        let header = request.header.as_ref().unwrap();
        assert_eq!(header.client_name, "tester");
        assert_eq!(header.request_timestamp, Some(Timestamp::new(3, 4)));
    }

    #[test]
    fn test_stamp_header_keeps_caller_values() {
        let core = ClientCore::new("tester", ManualClock::shared(0));
        let mut request = PowerCommandRequest {
            header: Some(RequestHeader {
                request_timestamp: Some(Timestamp::new(9, 0)),
                client_name: "caller".to_string(),
                disable_rpc_logging: true,
            }),
            ..Default::default()
        };
        core.stamp_header(&mut request);
        let header = request.header.unwrap();
        assert_eq!(header.client_name, "caller");
        assert_eq!(header.request_timestamp, Some(Timestamp::new(9, 0)));
        assert!(header.disable_rpc_logging);
    }

    #[test]
    fn test_from_config() {
        let config = SdkConfig::with_client_name("configured");
        let core = ClientCore::from_config(&config, ManualClock::shared(0));
        assert_eq!(core.client_name(), "configured");
        assert_eq!(core.default_timeout(), Some(config.rpc.default_timeout()));
    }

    #[test]
    fn test_stub_slot() {
        let slot: SharedSlot<str> = SharedSlot::empty();
        assert!(slot.get().is_none());
        slot.set(Arc::from("stub"));
        assert_eq!(slot.get().as_deref(), Some("stub"));
    }
}
