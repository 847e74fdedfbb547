// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-flight call bookkeeping.

use super::params::{CallContext, RpcParameters};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// What is known about a call between dispatch and completion.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Type name of the request.
    pub rpc_name: &'static str,
    pub logging_tag: String,
    pub started: Instant,
    pub deadline: Option<Instant>,
}

/// Calls started but not yet completed, keyed by call id.
#[derive(Debug)]
pub struct CallTracker {
    next_id: AtomicU64,
    in_flight: DashMap<u64, CallRecord>,
}

impl CallTracker {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            in_flight: DashMap::new(),
        }
    }

    /// Register a call and build the context handed to the stub.
    pub fn begin(
        &self,
        rpc_name: &'static str,
        params: &RpcParameters,
        default_timeout: Option<Duration>,
    ) -> CallContext {
        let call_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        let timeout = params.deadline.or(default_timeout);
        let deadline = timeout.and_then(|t| started.checked_add(t));

        self.in_flight.insert(
            call_id,
            CallRecord {
                rpc_name,
                logging_tag: params.logging_tag.clone(),
                started,
                deadline,
            },
        );

        CallContext {
            call_id,
            timeout,
            deadline,
            retry_policy: params.retry_policy.clone(),
            logging_tag: params.logging_tag.clone(),
        }
    }

    /// Remove a completed call; `None` if it was already finished.
    pub fn finish(&self, call_id: u64) -> Option<CallRecord> {
        self.in_flight.remove(&call_id).map(|(_, record)| record)
    }

    /// Number of calls in flight.
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Record of a call still in flight.
    pub fn get(&self, call_id: u64) -> Option<CallRecord> {
        self.in_flight.get(&call_id).map(|entry| entry.value().clone())
    }

    /// Ids of in-flight calls whose deadline has passed.
    pub fn overdue(&self) -> Vec<u64> {
        let now = Instant::now();
        self.in_flight
            .iter()
            .filter(|entry| entry.value().deadline.is_some_and(|d| d <= now))
            .map(|entry| *entry.key())
            .collect()
    }
}

impl Default for CallTracker {
    fn default() -> Self {
        Self::new()
    }
}
