// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory message model for the robot services the core talks to.
//!
//! The wire encoding is owned by the transport; these are plain Rust structs
//! mirroring the fields the core reads and writes. Every message implements
//! [`Message`] so it can be stripped, reflected into a response header, or
//! logged without knowing its concrete type.

pub mod directory;
pub mod docking;
pub mod graph_nav;
pub mod header;
pub mod lease;
pub mod payload;
pub mod power;
pub mod robot_command;
pub mod robot_state;
pub mod time_sync;
pub mod timestamp;

pub use header::{AnyMessage, CommonError, CommonErrorCode, RequestHeader, ResponseHeader};
pub use lease::{Lease, LeaseUseResult, LeaseUseStatus};
pub use timestamp::{Timestamp, WireDuration};

use std::any::Any;
use std::fmt;

/// Type-erased message.
pub trait Message: Any + Send + Sync + fmt::Debug {
    /// Fully qualified type name (key of the strip registry).
    fn type_name(&self) -> &'static str;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone behind a box.
    fn clone_message(&self) -> Box<dyn Message>;
}

/// Compile-time type name of a message.
pub trait NamedMessage: Message {
    /// Fully qualified type name.
    const TYPE_NAME: &'static str;
}

/// A request carrying the common request header.
pub trait Request: Message + Clone {
    /// Header, if set.
    fn header(&self) -> Option<&RequestHeader>;

    /// Mutable header slot.
    fn header_mut(&mut self) -> &mut Option<RequestHeader>;
}

/// A response carrying the common response header.
pub trait Response: Message + Clone + Default {
    /// Header, if set.
    fn header(&self) -> Option<&ResponseHeader>;

    /// Mutable header slot.
    fn header_mut(&mut self) -> &mut Option<ResponseHeader>;

    /// Lease-use results returned by the service, if any.
    fn lease_use_results(&self) -> Vec<&LeaseUseResult> {
        Vec::new()
    }
}

/// Implement [`Message`] and [`NamedMessage`] for a struct.
macro_rules! impl_message {
    ($ty:ty, $name:literal) => {
        impl $crate::api::Message for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn clone_message(&self) -> Box<dyn $crate::api::Message> {
                Box::new(self.clone())
            }
        }

        impl $crate::api::NamedMessage for $ty {
            const TYPE_NAME: &'static str = $name;
        }
    };
}

/// Implement [`Request`] for a struct with a `header: Option<RequestHeader>` field.
macro_rules! impl_request {
    ($ty:ty, $name:literal) => {
        $crate::api::impl_message!($ty, $name);

        impl $crate::api::Request for $ty {
            fn header(&self) -> Option<&$crate::api::RequestHeader> {
                self.header.as_ref()
            }

            fn header_mut(&mut self) -> &mut Option<$crate::api::RequestHeader> {
                &mut self.header
            }
        }
    };
}

/// Implement [`Response`] for a struct with a `header: Option<ResponseHeader>` field.
///
/// With `lease = field`, the `Option<LeaseUseResult>` field is reported by
/// [`Response::lease_use_results`].
macro_rules! impl_response {
    ($ty:ty, $name:literal) => {
        $crate::api::impl_message!($ty, $name);

        impl $crate::api::Response for $ty {
            fn header(&self) -> Option<&$crate::api::ResponseHeader> {
                self.header.as_ref()
            }

            fn header_mut(&mut self) -> &mut Option<$crate::api::ResponseHeader> {
                &mut self.header
            }
        }
    };
    ($ty:ty, $name:literal, lease = $field:ident) => {
        $crate::api::impl_message!($ty, $name);

        impl $crate::api::Response for $ty {
            fn header(&self) -> Option<&$crate::api::ResponseHeader> {
                self.header.as_ref()
            }

            fn header_mut(&mut self) -> &mut Option<$crate::api::ResponseHeader> {
                &mut self.header
            }

            fn lease_use_results(&self) -> Vec<&$crate::api::LeaseUseResult> {
                self.$field.iter().collect()
            }
        }
    };
}

pub(crate) use impl_message;
pub(crate) use impl_request;
pub(crate) use impl_response;
