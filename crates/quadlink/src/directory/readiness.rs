// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Blocking wait for a set of services to appear in the directory.

use super::ServiceDirectory;
use crate::config::{ReadinessConfig, DEFAULT_READINESS_INTERVAL};
use crate::status::{Condition, Status};
use std::collections::{BTreeSet, HashSet};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of [`wait_for_all_services`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaitResult {
    pub status: Status,
    /// Services still missing; meaningful only when `status` is a timeout.
    pub missing_services: BTreeSet<String>,
}

impl WaitResult {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn is_timeout(&self) -> bool {
        self.status == Condition::Timeout
    }
}

/// Poll `directory` until every name in `names` is registered.
///
/// * a list failure that is not retryable returns at once with that status
///   and an empty missing set;
/// * retryable failures keep polling;
/// * `timeout == 0` makes exactly one pass, a timeout too large to add to
///   the current instant never expires;
/// * on expiry the status is a timeout and `missing_services` holds the last
///   computed missing set.
pub fn wait_for_all_services<I, N>(
    names: I,
    directory: &dyn ServiceDirectory,
    timeout: Duration,
    interval: Duration,
) -> WaitResult
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    let required: BTreeSet<String> = names.into_iter().map(Into::into).collect();
    let deadline = Instant::now().checked_add(timeout);
    let mut missing = required.clone();
    let mut passes = 0u32;

    loop {
        passes += 1;
        let listed = directory.list_services();

        if listed.status.is_ok() {
            let registered: HashSet<&str> =
                listed.response.iter().map(|e| e.name.as_str()).collect();
            missing = required
                .iter()
                .filter(|name| !registered.contains(name.as_str()))
                .cloned()
                .collect();
            if missing.is_empty() {
                log::debug!(
                    "[readiness] {} service(s) ready after {} pass(es)",
                    required.len(),
                    passes
                );
                return WaitResult::default();
            }
            log::trace!("[readiness] waiting for {:?}", missing);
        } else if listed.status == Condition::Retryable {
            log::debug!("[readiness] retryable list failure: {}", listed.status);
        } else {
            log::warn!("[readiness] list failed: {}", listed.status);
            return WaitResult {
                status: listed.status,
                missing_services: BTreeSet::new(),
            };
        }

        let now = Instant::now();
        let pause = match deadline {
            Some(deadline) if now >= deadline => break,
            Some(deadline) => interval.min(deadline - now),
            None => interval,
        };
        thread::sleep(pause);
    }

    let names: Vec<&str> = missing.iter().map(String::as_str).collect();
    WaitResult {
        status: Status::timeout(format!(
            "services not registered after {:?}: {}",
            timeout,
            names.join(", ")
        )),
        missing_services: missing,
    }
}

/// [`wait_for_all_services`] polling every 100 ms.
pub fn wait_for_all_services_default<I, N>(
    names: I,
    directory: &dyn ServiceDirectory,
    timeout: Duration,
) -> WaitResult
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    wait_for_all_services(names, directory, timeout, DEFAULT_READINESS_INTERVAL)
}

/// [`wait_for_all_services`] with the interval and budget of `config`.
pub fn wait_for_all_services_with_config<I, N>(
    names: I,
    directory: &dyn ServiceDirectory,
    config: &ReadinessConfig,
) -> WaitResult
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    wait_for_all_services(names, directory, config.timeout(), config.interval())
}
