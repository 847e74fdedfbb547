// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Status values and the condition algebra.
//!
//! Every RPC-level operation in the SDK reports a [`Status`]: a category, an
//! integer code that is meaningful within that category, and an optional
//! chained message. Call sites never compare codes across categories; they
//! test a status against a [`Condition`] instead:
//!
//! ```rust
//! use quadlink::status::{Condition, SdkErrorCode, Status};
//!
//! let status = Status::sdk(SdkErrorCode::CommandTimedOutError, "polling command 42");
//! assert!(status == Condition::SdkError);
//! assert!(!status.is_ok());
//! ```
//!
//! The mapping `(category, code) -> condition` lives in one place,
//! [`Category::condition_of`].

mod codes;
mod service;

pub use codes::{SdkErrorCode, TransportCode, WaitCode};
pub(crate) use service::service_status;
pub use service::ServiceTable;

use crate::api::header::CommonErrorCode;
use std::fmt;

/// Category-independent equivalence classes of status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// The operation succeeded.
    Success,
    /// A service reported a non-success value (payload enum, header error,
    /// or a non-retryable transport failure).
    ResponseError,
    /// A client-side failure: missing stub, unset clock id, timeouts while
    /// polling, invalid arguments.
    SdkError,
    /// A transient transport condition; the call may be retried.
    Retryable,
    /// The readiness waiter ran out of time.
    Timeout,
}

impl Condition {
    /// Condition name as used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ResponseError => "ResponseError",
            Self::SdkError => "SDKError",
            Self::Retryable => "Retryable",
            Self::Timeout => "Timeout",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Generic success; code 0.
    Success,
    /// Client-side failures, codes from [`SdkErrorCode`].
    Sdk,
    /// Non-retryable transport failures, codes from [`TransportCode`].
    Transport,
    /// Transport failures the transport layer classified as retryable.
    Retryable,
    /// Header-level common error, codes from [`CommonErrorCode`].
    CommonHeader,
    /// Readiness waiter outcome, codes from [`WaitCode`].
    Wait,
    /// A service-defined response enumeration.
    Service(&'static ServiceTable),
}

impl Category {
    /// Category name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Sdk => "SDKError",
            Self::Transport => "Transport",
            Self::Retryable => "Retryable",
            Self::CommonHeader => "CommonError",
            Self::Wait => "WaitForServices",
            Self::Service(table) => table.name,
        }
    }

    /// Textual description of `code` within this category.
    pub fn describe(self, code: i32) -> &'static str {
        match self {
            Self::Success => {
                if code == 0 {
                    "Success"
                } else {
                    "UnknownSuccessCode"
                }
            }
            Self::Sdk => SdkErrorCode::from_i32(code).map_or("UnknownSdkError", SdkErrorCode::as_str),
            Self::Transport | Self::Retryable => {
                TransportCode::from_i32(code).map_or("UNKNOWN_TRANSPORT_CODE", TransportCode::as_str)
            }
            Self::CommonHeader => {
                CommonErrorCode::from_i32(code).map_or("CODE_UNKNOWN", CommonErrorCode::as_str)
            }
            Self::Wait => WaitCode::from_i32(code).map_or("UnknownWaitCode", WaitCode::as_str),
            Self::Service(table) => table.describe(code),
        }
    }

    /// Condition that `code` belongs to within this category.
    pub fn condition_of(self, code: i32) -> Condition {
        match self {
            Self::Success => {
                if code == 0 {
                    Condition::Success
                } else {
                    Condition::ResponseError
                }
            }
            Self::Sdk => {
                if code == SdkErrorCode::Success as i32 {
                    Condition::Success
                } else {
                    Condition::SdkError
                }
            }
            Self::Transport => {
                if code == TransportCode::Ok as i32 {
                    Condition::Success
                } else {
                    Condition::ResponseError
                }
            }
            Self::Retryable => {
                if code == TransportCode::Ok as i32 {
                    Condition::Success
                } else {
                    Condition::Retryable
                }
            }
            Self::CommonHeader => {
                if code == CommonErrorCode::Ok as i32 {
                    Condition::Success
                } else {
                    Condition::ResponseError
                }
            }
            Self::Wait => {
                if code == WaitCode::Ok as i32 {
                    Condition::Success
                } else {
                    Condition::Timeout
                }
            }
            Self::Service(table) => {
                if table.is_success(code) {
                    Condition::Success
                } else {
                    Condition::ResponseError
                }
            }
        }
    }
}

/// Compound status value: category, code and a chained explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    category: Category,
    code: i32,
    message: String,
}

impl Status {
    /// Create a status from its parts.
    pub fn new(category: Category, code: i32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Generic success.
    pub fn ok() -> Self {
        Self::new(Category::Success, 0, String::new())
    }

    /// Client-side failure.
    pub fn sdk(code: SdkErrorCode, message: impl Into<String>) -> Self {
        Self::new(Category::Sdk, code as i32, message)
    }

    /// Status from a service-defined response enumeration value.
    pub fn service(table: &'static ServiceTable, code: i32) -> Self {
        Self::new(Category::Service(table), code, String::new())
    }

    /// Readiness timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Category::Wait, WaitCode::Timeout as i32, message)
    }

    /// Header-level common error.
    pub fn common(code: CommonErrorCode, message: impl Into<String>) -> Self {
        Self::new(Category::CommonHeader, code as i32, message)
    }

    /// Integer code, meaningful within [`Status::category`].
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Source category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Chained explanation (may be empty).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the code within its category.
    pub fn describe(&self) -> &'static str {
        self.category.describe(self.code)
    }

    /// Condition this status belongs to.
    pub fn condition(&self) -> Condition {
        self.category.condition_of(self.code)
    }

    /// True iff this status belongs to `condition`.
    pub fn equivalent(&self, condition: Condition) -> bool {
        self.condition() == condition
    }

    /// True iff equivalent to [`Condition::Success`].
    pub fn is_ok(&self) -> bool {
        self.equivalent(Condition::Success)
    }

    /// Same category and code with `message` prepended to the explanation.
    #[must_use]
    pub fn chain(&self, message: impl AsRef<str>) -> Self {
        let message = message.as_ref();
        let chained = if self.message.is_empty() {
            message.to_string()
        } else {
            format!("{}: {}", message, self.message)
        };
        Self::new(self.category, self.code, chained)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::ok()
    }
}

impl PartialEq<Condition> for Status {
    fn eq(&self, other: &Condition) -> bool {
        self.equivalent(*other)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.category.name(),
            self.describe(),
            self.code
        )?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Status {}

impl From<SdkErrorCode> for Status {
    fn from(code: SdkErrorCode) -> Self {
        Self::sdk(code, String::new())
    }
}
