// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call knobs and the context handed to a stub.

use std::time::{Duration, Instant};

/// Retry settings forwarded to the transport. The core never retries itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Total attempts including the first; 0 lets the transport decide.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

/// Per-call parameters supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RpcParameters {
    /// Budget for the call; the client default applies when unset.
    pub deadline: Option<Duration>,
    pub retry_policy: RetryPolicy,
    /// Free-form tag carried into log lines.
    pub logging_tag: String,
    /// Trace-log a stripped copy of the request.
    pub log_requests: bool,
}

impl RpcParameters {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_logging_tag(mut self, tag: impl Into<String>) -> Self {
        self.logging_tag = tag.into();
        self
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }
}

/// Everything a stub needs to know about one call.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Identifier assigned by the call tracker.
    pub call_id: u64,
    /// Per-call timeout, if any.
    pub timeout: Option<Duration>,
    /// Absolute deadline derived from `timeout` at dispatch.
    pub deadline: Option<Instant>,
    pub retry_policy: RetryPolicy,
    pub logging_tag: String,
}

impl CallContext {
    /// Context with no deadline, used by tests and ad-hoc stubs.
    pub fn detached(call_id: u64) -> Self {
        Self {
            call_id,
            timeout: None,
            deadline: None,
            retry_policy: RetryPolicy::default(),
            logging_tag: String::new(),
        }
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let params = RpcParameters::default()
            .with_deadline(Duration::from_secs(2))
            .with_logging_tag("dock")
            .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(50)))
            .with_request_logging(true);
        assert_eq!(params.deadline, Some(Duration::from_secs(2)));
        assert_eq!(params.logging_tag, "dock");
        assert_eq!(params.retry_policy.max_attempts, 3);
        assert!(params.log_requests);
    }

    #[test]
    fn test_detached_context_never_expires() {
        let ctx = CallContext::detached(9);
        assert_eq!(ctx.remaining(), None);
        assert!(!ctx.is_expired());
    }

    #[test]
    fn test_remaining_saturates() {
        let mut ctx = CallContext::detached(1);
        ctx.deadline = Some(Instant::now());
        std::thread::sleep(Duration::from_millis(1));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert!(ctx.is_expired());
    }
}
