// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time synchronization with the robot.
//!
//! [`TimeSyncEndpoint`] runs the estimation protocol through a
//! [`TimeSyncClient`]; [`TimeSyncThread`] drives it in the background; a
//! [`RobotTimeConverter`] turns local time points into robot timestamps for
//! commands that carry an absolute end time.

mod client;
mod converter;
mod endpoint;
mod thread;

pub use client::{TimeSyncClient, TimeSyncStub};
pub use converter::RobotTimeConverter;
pub use endpoint::TimeSyncEndpoint;
pub use thread::TimeSyncThread;
