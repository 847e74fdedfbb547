// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Background worker keeping the time-sync estimate fresh.
//!
//! Per iteration the worker picks a delay from the latest estimate status,
//! sleeps, and runs one exchange:
//!
//! | latest status       | delay                  |
//! |---------------------|------------------------|
//! | `SERVICE_NOT_READY` | not-ready back-off     |
//! | `OK`                | poll interval          |
//! | anything else       | none                   |
//!
//! A failed exchange additionally waits one slice. Every sleep is a condvar
//! wait of at most one slice, so `stop` is honored within a slice.

use super::TimeSyncEndpoint;
use crate::api::time_sync::TimeSyncStatus;
use crate::config::{
    TimeSyncConfig, DEFAULT_TIME_SYNC_NOT_READY_BACKOFF, DEFAULT_TIME_SYNC_POLL_INTERVAL,
    TIME_SYNC_SLICE,
};
use parking_lot::{Condvar, Mutex, RwLock};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Lifecycle {
    should_exit: bool,
    thread_stopped: bool,
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    poll_interval: Duration,
    not_ready_backoff: Duration,
    slice: Duration,
}

#[derive(Debug)]
struct Shared {
    endpoint: Arc<TimeSyncEndpoint>,
    lifecycle: Mutex<Lifecycle>,
    signal: Condvar,
    timing: RwLock<Timing>,
}

/// Handle to the time-sync worker. Dropping it stops the worker.
#[derive(Debug)]
pub struct TimeSyncThread {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TimeSyncThread {
    /// Worker with the default intervals; not started.
    pub fn new(endpoint: Arc<TimeSyncEndpoint>) -> Self {
        Self::with_timing(
            endpoint,
            DEFAULT_TIME_SYNC_POLL_INTERVAL,
            DEFAULT_TIME_SYNC_NOT_READY_BACKOFF,
            TIME_SYNC_SLICE,
        )
    }

    /// Worker with the intervals from `config`; not started.
    pub fn from_config(endpoint: Arc<TimeSyncEndpoint>, config: &TimeSyncConfig) -> Self {
        Self::with_timing(
            endpoint,
            config.poll_interval(),
            config.not_ready_backoff(),
            config.slice(),
        )
    }

    /// Worker with explicit intervals; not started.
    pub fn with_timing(
        endpoint: Arc<TimeSyncEndpoint>,
        poll_interval: Duration,
        not_ready_backoff: Duration,
        slice: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                endpoint,
                lifecycle: Mutex::new(Lifecycle {
                    should_exit: false,
                    thread_stopped: true,
                }),
                signal: Condvar::new(),
                timing: RwLock::new(Timing {
                    poll_interval,
                    not_ready_backoff,
                    slice: slice.max(Duration::from_millis(1)),
                }),
            }),
            handle: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> Arc<TimeSyncEndpoint> {
        Arc::clone(&self.shared.endpoint)
    }

    /// Start the worker; no-op if it is already running.
    pub fn start(&self) -> io::Result<()> {
        let mut handle = self.handle.lock();
        {
            let mut life = self.shared.lifecycle.lock();
            if !life.thread_stopped {
                return Ok(());
            }
            life.should_exit = false;
            life.thread_stopped = false;
        }

        // A previous worker has already flagged itself stopped.
        if let Some(old) = handle.take() {
            let _ = old.join();
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("quadlink-timesync".into())
            .spawn(move || worker_loop(&shared));

        match spawned {
            Ok(join) => {
                *handle = Some(join);
                Ok(())
            }
            Err(e) => {
                self.shared.lifecycle.lock().thread_stopped = true;
                log::warn!("[time-sync] failed to spawn worker: {}", e);
                Err(e)
            }
        }
    }

    /// Ask the worker to exit and block until it has.
    pub fn stop(&self) {
        let mut handle = self.handle.lock();
        {
            let mut life = self.shared.lifecycle.lock();
            life.should_exit = true;
            self.shared.signal.notify_all();
            while !life.thread_stopped {
                self.shared.signal.wait(&mut life);
            }
        }
        if let Some(join) = handle.take() {
            let _ = join.join();
        }
    }

    /// True whenever no worker is running.
    pub fn is_stopped(&self) -> bool {
        self.shared.lifecycle.lock().thread_stopped
    }

    /// Block until sync is established (true), `timeout` passes or the
    /// worker stops first (false).
    pub fn wait_for_sync(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let slice = self.shared.timing.read().slice;
        loop {
            if self.shared.endpoint.has_established_time_sync() {
                return true;
            }
            let mut life = self.shared.lifecycle.lock();
            if life.thread_stopped {
                drop(life);
                return self.shared.endpoint.has_established_time_sync();
            }
            let now = Instant::now();
            let wait = match deadline {
                Some(deadline) if now >= deadline => return false,
                Some(deadline) => slice.min(deadline - now),
                None => slice,
            };
            self.shared.signal.wait_for(&mut life, wait);
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.shared.timing.read().poll_interval
    }

    /// Change the interval used once sync is established.
    pub fn set_poll_interval(&self, interval: Duration) {
        self.shared.timing.write().poll_interval = interval;
        self.shared.signal.notify_all();
    }

    pub fn not_ready_backoff(&self) -> Duration {
        self.shared.timing.read().not_ready_backoff
    }

    pub fn slice(&self) -> Duration {
        self.shared.timing.read().slice
    }
}

impl Drop for TimeSyncThread {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sets `thread_stopped` when the worker returns or unwinds.
struct StoppedGuard<'a>(&'a Shared);

impl Drop for StoppedGuard<'_> {
    fn drop(&mut self) {
        self.0.lifecycle.lock().thread_stopped = true;
        self.0.signal.notify_all();
    }
}

fn worker_loop(shared: &Shared) {
    let _stopped = StoppedGuard(shared);
    log::debug!("[time-sync] worker started");

    loop {
        if shared.lifecycle.lock().should_exit {
            break;
        }

        let delay = next_delay(shared);
        if !sleep_unless_stopped(shared, delay) {
            break;
        }

        let status = shared.endpoint.get_new_estimate();
        if !status.is_ok() {
            let slice = shared.timing.read().slice;
            if !sleep_unless_stopped(shared, slice) {
                break;
            }
        }
        shared.signal.notify_all();
    }

    log::debug!("[time-sync] worker stopped");
}

fn next_delay(shared: &Shared) -> Duration {
    let timing = *shared.timing.read();
    match shared.endpoint.sync_status() {
        TimeSyncStatus::ServiceNotReady => timing.not_ready_backoff,
        TimeSyncStatus::Ok => timing.poll_interval,
        TimeSyncStatus::Unknown | TimeSyncStatus::MoreSamplesNeeded => Duration::ZERO,
    }
}

/// Sleep up to `delay` in slices; false if an exit was requested.
fn sleep_unless_stopped(shared: &Shared, delay: Duration) -> bool {
    let deadline = Instant::now().checked_add(delay);
    let mut life = shared.lifecycle.lock();
    loop {
        if life.should_exit {
            return false;
        }
        let now = Instant::now();
        let slice = shared.timing.read().slice;
        let wait = match deadline {
            Some(deadline) if now >= deadline => return true,
            Some(deadline) => slice.min(deadline - now),
            None => slice,
        };
        shared.signal.wait_for(&mut life, wait);
    }
}
