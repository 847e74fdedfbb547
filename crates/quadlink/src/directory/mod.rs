// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Robot directory access and service readiness waiting.

mod client;
mod readiness;

pub use client::{DirectoryClient, DirectoryStub};
pub use readiness::{
    wait_for_all_services, wait_for_all_services_default, wait_for_all_services_with_config,
    WaitResult,
};

use crate::api::directory::ServiceEntry;
use crate::rpc::RpcResult;

/// Anything that can list the services registered on the robot.
pub trait ServiceDirectory {
    fn list_services(&self) -> RpcResult<Vec<ServiceEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReadinessConfig;
    use crate::rpc::TransportStatus;
    use crate::status::{Condition, TransportCode};
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::time::{Duration, Instant};

    /// Directory replaying canned list results; the last one repeats.
    struct CannedDirectory {
        replies: Mutex<VecDeque<RpcResult<Vec<ServiceEntry>>>>,
        calls: Mutex<u32>,
    }

    impl CannedDirectory {
        fn new(replies: Vec<RpcResult<Vec<ServiceEntry>>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(0),
            }
        }

        fn listing(names: &[&str]) -> RpcResult<Vec<ServiceEntry>> {
            RpcResult::ok(names.iter().map(|n| ServiceEntry::new(*n)).collect())
        }

        fn calls(&self) -> u32 {
            *self.calls.lock()
        }
    }

    impl ServiceDirectory for CannedDirectory {
        fn list_services(&self) -> RpcResult<Vec<ServiceEntry>> {
            *self.calls.lock() += 1;
            let mut replies = self.replies.lock();
            if replies.len() > 1 {
                replies.pop_front().unwrap_or_default()
            } else {
                replies.front().cloned().unwrap_or_default()
            }
        }
    }

    #[test]
    fn test_zero_timeout_is_one_pass() {
        let directory = CannedDirectory::new(vec![CannedDirectory::listing(&[])]);
        let result = wait_for_all_services(["a"], &directory, Duration::ZERO, Duration::from_millis(50));
        assert_eq!(directory.calls(), 1);
        assert!(result.is_timeout());
        assert!(result.missing_services.contains("a"));
    }

    #[test]
    fn test_non_retryable_failure_returns_immediately() {
        let failure = RpcResult::err(
            TransportStatus::error(TransportCode::PermissionDenied, "denied").to_status(),
        );
        let directory = CannedDirectory::new(vec![failure]);
        let result = wait_for_all_services(
            ["a", "b"],
            &directory,
            Duration::from_secs(5),
            Duration::from_millis(10),
        );
        assert_eq!(directory.calls(), 1);
        assert!(result.status == Condition::ResponseError);
        assert!(result.missing_services.is_empty());
    }

    #[test]
    fn test_retryable_failure_keeps_polling() {
        let retry = RpcResult::err(
            TransportStatus::retryable(TransportCode::Unavailable, "booting").to_status(),
        );
        let directory = CannedDirectory::new(vec![
            retry.clone(),
            retry,
            CannedDirectory::listing(&["a"]),
        ]);
        let result = wait_for_all_services(
            ["a"],
            &directory,
            Duration::from_secs(2),
            Duration::from_millis(5),
        );
        assert!(result.is_ok());
        assert_eq!(directory.calls(), 3);
    }

    #[test]
    fn test_unbounded_timeout_polls_until_ready() {
        let directory = CannedDirectory::new(vec![
            CannedDirectory::listing(&[]),
            CannedDirectory::listing(&["a"]),
        ]);
        let result = wait_for_all_services(["a"], &directory, Duration::MAX, Duration::from_millis(1));
        assert!(result.is_ok());
        assert_eq!(directory.calls(), 2);
    }

    #[test]
    fn test_empty_request_is_ready() {
        let directory = CannedDirectory::new(vec![CannedDirectory::listing(&[])]);
        let result = wait_for_all_services(Vec::<String>::new(), &directory, Duration::ZERO, Duration::ZERO);
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_budget() {
        let directory = CannedDirectory::new(vec![CannedDirectory::listing(&["x"])]);
        let config = ReadinessConfig {
            interval_ms: 10,
            timeout_ms: 50,
        };
        let start = Instant::now();
        let result = wait_for_all_services_with_config(["y"], &directory, &config);
        assert!(result.is_timeout());
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(result.missing_services.len(), 1);
    }
}
