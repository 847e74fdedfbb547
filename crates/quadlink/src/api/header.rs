// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Common request/response headers.

use super::{Message, Timestamp};
use std::fmt;

/// Header every request carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestHeader {
    /// Client-local send time.
    pub request_timestamp: Option<Timestamp>,
    /// Name of the calling client; must be non-empty.
    pub client_name: String,
    /// Ask the service not to record this request in its RPC log.
    pub disable_rpc_logging: bool,
}

/// Header-level error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum CommonErrorCode {
    /// Untouched header.
    #[default]
    Unspecified = 0,
    Ok = 1,
    InternalServerError = 2,
    InvalidRequest = 3,
}

impl CommonErrorCode {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "CODE_UNSPECIFIED",
            Self::Ok => "CODE_OK",
            Self::InternalServerError => "CODE_INTERNAL_SERVER_ERROR",
            Self::InvalidRequest => "CODE_INVALID_REQUEST",
        }
    }

    /// Parse a raw wire value.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Ok),
            2 => Some(Self::InternalServerError),
            3 => Some(Self::InvalidRequest),
            _ => None,
        }
    }
}

/// Common error carried in every response header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommonError {
    pub code: CommonErrorCode,
    pub message: String,
}

/// Owned, type-erased copy of a message (usually a stripped request).
pub struct AnyMessage(Box<dyn Message>);

impl AnyMessage {
    /// Box a copy of `message`.
    pub fn new<M: Message + Clone>(message: M) -> Self {
        Self(Box::new(message))
    }

    /// Type name of the wrapped message.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Borrow as the concrete type.
    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.0.as_any().downcast_ref::<M>()
    }

    /// Borrow the erased message.
    pub fn as_message(&self) -> &dyn Message {
        self.0.as_ref()
    }
}

impl From<Box<dyn Message>> for AnyMessage {
    fn from(message: Box<dyn Message>) -> Self {
        Self(message)
    }
}

impl Clone for AnyMessage {
    fn clone(&self) -> Self {
        Self(self.0.clone_message())
    }
}

impl fmt::Debug for AnyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyMessage").field(&self.0).finish()
    }
}

/// Header every response carries.
#[derive(Debug, Clone, Default)]
pub struct ResponseHeader {
    /// Copy of the request's header.
    pub request_header: Option<RequestHeader>,
    /// Server time the request arrived.
    pub request_received_timestamp: Option<Timestamp>,
    /// Server time the response was finalized.
    pub response_timestamp: Option<Timestamp>,
    pub error: CommonError,
    /// Reflected (and stripped) copy of the request.
    pub request: Option<AnyMessage>,
}

impl ResponseHeader {
    /// Header with only the error code set.
    pub fn with_code(code: CommonErrorCode) -> Self {
        Self {
            error: CommonError {
                code,
                message: String::new(),
            },
            ..Self::default()
        }
    }
}
