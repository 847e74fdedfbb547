// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service-defined response enumerations as status categories.
//!
//! Each response enumeration gets one [`ServiceTable`] listing the values that
//! count as success; every other value is a `ResponseError`. The
//! [`service_status!`] macro stamps out the Rust enum together with its table.

/// Static description of one service response enumeration.
#[derive(Debug, PartialEq, Eq)]
pub struct ServiceTable {
    /// Enumeration name, e.g. `"PowerCommandStatus"`.
    pub name: &'static str,
    /// Values equivalent to `Success`.
    pub success: &'static [i32],
    /// Known values and their names.
    pub values: &'static [(i32, &'static str)],
}

impl ServiceTable {
    /// True iff `code` is one of the configured success values.
    pub fn is_success(&self, code: i32) -> bool {
        self.success.contains(&code)
    }

    /// Name of `code`, or `"UNKNOWN_VALUE"` for values outside the table.
    pub fn describe(&self, code: i32) -> &'static str {
        self.values
            .iter()
            .find(|(value, _)| *value == code)
            .map_or("UNKNOWN_VALUE", |(_, name)| name)
    }
}

/// Declare a service response enumeration and its status table.
///
/// ```ignore
/// service_status! {
///     /// Docking feedback values.
///     pub enum DockingFeedbackStatus as "DockingCommandFeedbackResponse_Status",
///         success = [InProgress, Docked]
///     {
///         #[default]
///         Unknown = 0 => "STATUS_UNKNOWN",
///         InProgress = 1 => "STATUS_IN_PROGRESS",
///         Docked = 2 => "STATUS_DOCKED",
///     }
/// }
/// ```
macro_rules! service_status {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $table:literal, success = [$($ok:ident),+ $(,)?] {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(i32)]
        $vis enum $name {
            $( $(#[$vmeta])* #[doc = $label] $variant = $value ),+
        }

        impl $name {
            /// Status table for this enumeration.
            pub const TABLE: &'static $crate::status::ServiceTable = &$crate::status::ServiceTable {
                name: $table,
                success: &[$($name::$ok as i32),+],
                values: &[$(($value, $label)),+],
            };

            /// Parse a raw wire value.
            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Wire name of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// This value lifted into a [`Status`](crate::status::Status).
            pub fn status(self) -> $crate::status::Status {
                $crate::status::Status::service(Self::TABLE, self as i32)
            }
        }

        impl From<$name> for $crate::status::Status {
            fn from(value: $name) -> Self {
                value.status()
            }
        }
    };
}

pub(crate) use service_status;
