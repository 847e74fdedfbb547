// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport-level call outcome.

use crate::status::{Category, Status, TransportCode};
use std::fmt;

/// Outcome reported by the transport for one call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportStatus {
    pub code: TransportCode,
    pub message: String,
    /// Set by the transport when the failure is transient.
    pub retryable: bool,
}

impl TransportStatus {
    /// Successful call.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Permanent failure.
    pub fn error(code: TransportCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: false,
        }
    }

    /// Transient failure.
    pub fn retryable(code: TransportCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == TransportCode::Ok
    }

    /// Lift into a [`Status`]: `Retryable/<code>` when the transport marked
    /// the failure retryable, `Transport/<code>` otherwise.
    pub fn to_status(&self) -> Status {
        if self.is_ok() {
            return Status::ok();
        }
        let category = if self.retryable {
            Category::Retryable
        } else {
            Category::Transport
        };
        Status::new(category, self.code as i32, self.message.clone())
    }
}

impl From<&TransportStatus> for Status {
    fn from(transport: &TransportStatus) -> Self {
        transport.to_status()
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code.as_str())?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if self.retryable {
            write!(f, " (retryable)")?;
        }
        Ok(())
    }
}

/// One-shot completion a stub invokes when the call finishes.
pub type Completion<Rsp> = Box<dyn FnOnce(TransportStatus, Rsp) + Send>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Condition;

    #[test]
    fn test_lifting() {
        assert!(TransportStatus::ok().to_status().is_ok());

        let hard = TransportStatus::error(TransportCode::PermissionDenied, "denied").to_status();
        assert_eq!(hard.category(), Category::Transport);
        assert!(hard == Condition::ResponseError);
        assert_eq!(hard.message(), "denied");

        let soft = TransportStatus::retryable(TransportCode::Unavailable, "down").to_status();
        assert_eq!(soft.category(), Category::Retryable);
        assert!(soft == Condition::Retryable);
        assert_eq!(soft.code(), TransportCode::Unavailable as i32);
    }

    #[test]
    fn test_display() {
        let status = TransportStatus::retryable(TransportCode::Unavailable, "no route");
        assert_eq!(status.to_string(), "UNAVAILABLE: no route (retryable)");
    }
}
