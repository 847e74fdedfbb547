// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Code tables for the built-in status categories.

/// Client-side error codes (category [`super::Category::Sdk`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SdkErrorCode {
    /// No error.
    Success = 0,
    /// Unclassified client-side failure.
    GenericSdkError = 1,
    /// The service stub was never installed with `set_comms`.
    StubNotInitialized = 2,
    /// Time sync has not yet produced a clock identifier.
    ClockIdentifierUnset = 3,
    /// No time-sync exchange has completed yet.
    PreviousTimeSyncUnavailableYet = 4,
    /// Time sync exchanges ran but the estimate is not yet `OK`.
    TimeSyncNotEstablished = 5,
    /// A blocking command helper ran out of time.
    CommandTimedOutError = 6,
    /// A payload could not be encoded or decoded.
    SerializationFailed = 7,
    /// A caller-supplied argument is out of range.
    InvalidArgument = 8,
    /// The caller's early-end predicate stopped a helper.
    EarlyEnd = 9,
    /// The lease wallet holds no lease for the requested resource.
    LeaseNotAvailable = 10,
}

impl SdkErrorCode {
    /// Code name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::GenericSdkError => "GenericSDKError",
            Self::StubNotInitialized => "StubNotInitialized",
            Self::ClockIdentifierUnset => "ClockIdentifierUnset",
            Self::PreviousTimeSyncUnavailableYet => "PreviousTimeSyncUnavailableYet",
            Self::TimeSyncNotEstablished => "TimeSyncNotEstablished",
            Self::CommandTimedOutError => "CommandTimedOutError",
            Self::SerializationFailed => "SerializationFailed",
            Self::InvalidArgument => "InvalidArgument",
            Self::EarlyEnd => "EarlyEnd",
            Self::LeaseNotAvailable => "LeaseNotAvailable",
        }
    }

    /// Parse a raw code.
    pub fn from_i32(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Success,
            1 => Self::GenericSdkError,
            2 => Self::StubNotInitialized,
            3 => Self::ClockIdentifierUnset,
            4 => Self::PreviousTimeSyncUnavailableYet,
            5 => Self::TimeSyncNotEstablished,
            6 => Self::CommandTimedOutError,
            7 => Self::SerializationFailed,
            8 => Self::InvalidArgument,
            9 => Self::EarlyEnd,
            10 => Self::LeaseNotAvailable,
            _ => return None,
        })
    }
}

/// Transport status codes (gRPC numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum TransportCode {
    #[default]
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl TransportCode {
    /// Code name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }

    /// Parse a raw code.
    pub fn from_i32(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => return None,
        })
    }
}

/// Readiness waiter outcome codes (category [`super::Category::Wait`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WaitCode {
    /// Every requested service is registered.
    Ok = 0,
    /// The deadline passed with services still missing.
    Timeout = 1,
}

impl WaitCode {
    /// Code name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "Success",
            Self::Timeout => "TimedOutWaitingForServices",
        }
    }

    /// Parse a raw code.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::Timeout),
            _ => None,
        }
    }
}
