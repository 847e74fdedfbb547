// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Deadline-bounded feedback polling shared by the command helpers.

use crate::status::{Category, SdkErrorCode, Status, TransportCode};
use crate::time::{deadline_after, RateLimiter};
use std::fmt;
use std::time::{Duration, Instant};

/// Classification of one feedback observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackState {
    /// The command reached its goal.
    Succeeded,
    /// Still running; carries the observed status.
    InProgress(Status),
    /// Terminal failure reported by the service.
    Failed(Status),
}

/// How a polling loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    Failed(Status),
    TimedOut(Status),
    /// The early-end predicate fired; carries the last non-terminal status.
    EarlyEnd(Status),
}

impl PollOutcome {
    pub fn into_status(self) -> Status {
        match self {
            PollOutcome::Succeeded => Status::ok(),
            PollOutcome::Failed(s) | PollOutcome::TimedOut(s) | PollOutcome::EarlyEnd(s) => s,
        }
    }
}

type EarlyEnd = Box<dyn Fn() -> bool + Send + Sync>;

/// Polling budget, pace and abort predicate of a command helper.
pub struct FeedbackPoller {
    timeout: Duration,
    update_frequency: f64,
    early_end: Option<EarlyEnd>,
}

impl FeedbackPoller {
    /// `update_frequency` is in Hz; negative means no sleep between polls and
    /// zero is rejected when polling starts.
    pub fn new(timeout: Duration, update_frequency: f64) -> Self {
        Self {
            timeout,
            update_frequency,
            early_end: None,
        }
    }

    /// Abort polling as soon as `predicate` returns true.
    #[must_use]
    pub fn with_early_end(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.early_end = Some(Box::new(predicate));
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn update_frequency(&self) -> f64 {
        self.update_frequency
    }

    /// Deadline of a helper starting now, capped at [`deadline_after`].
    pub fn deadline_from_now(&self) -> Instant {
        deadline_after(self.timeout)
    }

    pub fn should_end_early(&self) -> bool {
        self.early_end.as_ref().is_some_and(|f| f())
    }

    /// Reject a zero update frequency.
    pub fn validate(&self) -> Result<(), Status> {
        if self.update_frequency == 0.0 {
            return Err(Status::sdk(
                SdkErrorCode::InvalidArgument,
                "update frequency must be non-zero",
            ));
        }
        Ok(())
    }

    /// Poll `feedback` until it reports a terminal state, `deadline` passes or
    /// the early-end predicate fires.
    ///
    /// `feedback` receives the remaining budget and returns either the
    /// classified observation or the failed call status. `initial` is the
    /// status reported when the loop ends early before any observation.
    pub fn poll<F>(
        &self,
        deadline: Instant,
        command: impl fmt::Display,
        initial: Status,
        mut feedback: F,
    ) -> PollOutcome
    where
        F: FnMut(Duration) -> Result<FeedbackState, Status>,
    {
        let Some(mut limiter) = RateLimiter::from_frequency(self.update_frequency) else {
            return PollOutcome::Failed(Status::sdk(
                SdkErrorCode::InvalidArgument,
                "update frequency must be non-zero",
            ));
        };
        let mut last = initial;
        let mut passes = 0u32;

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if self.should_end_early() {
                log::debug!("[command] {} ended early after {} pass(es)", command, passes);
                return PollOutcome::EarlyEnd(last);
            }

            limiter.begin_pass();
            passes += 1;
            match feedback(deadline - now) {
                Ok(FeedbackState::Succeeded) => {
                    log::debug!("[command] {} succeeded after {} pass(es)", command, passes);
                    return PollOutcome::Succeeded;
                }
                Ok(FeedbackState::InProgress(status)) => last = status,
                Ok(FeedbackState::Failed(status)) => {
                    log::debug!("[command] {} failed: {}", command, status);
                    return PollOutcome::Failed(status);
                }
                Err(status) if is_deadline_exceeded(&status) => {
                    return PollOutcome::TimedOut(
                        Status::sdk(SdkErrorCode::CommandTimedOutError, String::new())
                            .chain(format!("feedback for {} timed out", command)),
                    );
                }
                Err(status) => {
                    log::warn!("[command] feedback for {} failed: {}", command, status);
                    return PollOutcome::Failed(status.chain(format!("feedback for {}", command)));
                }
            }

            limiter.wait(deadline.saturating_duration_since(Instant::now()));
        }

        PollOutcome::TimedOut(
            Status::sdk(SdkErrorCode::CommandTimedOutError, String::new())
                .chain(format!("{} still running at deadline", command)),
        )
    }
}

impl fmt::Debug for FeedbackPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackPoller")
            .field("timeout", &self.timeout)
            .field("update_frequency", &self.update_frequency)
            .field("early_end", &self.early_end.is_some())
            .finish()
    }
}

fn is_deadline_exceeded(status: &Status) -> bool {
    matches!(status.category(), Category::Transport | Category::Retryable)
        && status.code() == TransportCode::DeadlineExceeded as i32
}
