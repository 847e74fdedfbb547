// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One-shot promise and the shared future it fulfils.
//!
//! The promise side is handed to a transport completion; the future side can
//! be cloned and waited on from any number of threads, either blocking
//! ([`SharedFuture::wait`]) or from an async executor (it implements
//! [`std::future::Future`]).

use parking_lot::{Condvar, Mutex};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

struct Slot<T> {
    value: Option<T>,
    wakers: Vec<Waker>,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

/// Write side; consumed by [`Promise::set_value`].
pub struct Promise<T> {
    shared: Arc<Shared<T>>,
}

/// Read side; cheap to clone.
pub struct SharedFuture<T> {
    shared: Arc<Shared<T>>,
}

/// Create a connected promise/future pair.
pub fn promise_pair<T>() -> (Promise<T>, SharedFuture<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            value: None,
            wakers: Vec::new(),
        }),
        ready: Condvar::new(),
    });
    (
        Promise {
            shared: Arc::clone(&shared),
        },
        SharedFuture { shared },
    )
}

impl<T> Promise<T> {
    /// Store the value and wake every waiter.
    pub fn set_value(self, value: T) {
        let wakers = {
            let mut slot = self.shared.slot.lock();
            slot.value = Some(value);
            std::mem::take(&mut slot.wakers)
        };
        self.shared.ready.notify_all();
        for waker in wakers {
            waker.wake();
        }
    }
}

impl<T> std::fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise").finish_non_exhaustive()
    }
}

impl<T: Clone> SharedFuture<T> {
    /// Future that is already fulfilled.
    pub fn ready(value: T) -> Self {
        let (promise, future) = promise_pair();
        promise.set_value(value);
        future
    }

    /// True once the promise has been fulfilled.
    pub fn is_ready(&self) -> bool {
        self.shared.slot.lock().value.is_some()
    }

    /// Value if already fulfilled.
    pub fn try_get(&self) -> Option<T> {
        self.shared.slot.lock().value.clone()
    }

    /// Block until fulfilled.
    pub fn wait(&self) -> T {
        let mut slot = self.shared.slot.lock();
        loop {
            if let Some(value) = slot.value.as_ref() {
                return value.clone();
            }
            self.shared.ready.wait(&mut slot);
        }
    }

    /// Block until fulfilled or `timeout` elapses.
    ///
    /// A timeout past the end of the clock's range waits like [`wait`](Self::wait).
    pub fn wait_for(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.wait());
        };
        let mut slot = self.shared.slot.lock();
        loop {
            if let Some(value) = slot.value.as_ref() {
                return Some(value.clone());
            }
            if self.shared.ready.wait_until(&mut slot, deadline).timed_out() {
                return slot.value.clone();
            }
        }
    }
}

impl<T> Clone for SharedFuture<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for SharedFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ready = self.shared.slot.lock().value.is_some();
        f.debug_struct("SharedFuture").field("ready", &ready).finish()
    }
}

impl<T: Clone> Future for SharedFuture<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let mut slot = self.shared.slot.lock();
        if let Some(value) = slot.value.as_ref() {
            return Poll::Ready(value.clone());
        }
        if !slot.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            slot.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
