// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # quadlink - client core for quadruped robot services
//!
//! Transport-agnostic building blocks shared by every robot service client:
//! a uniform status model, a generic async call dispatcher with blocking
//! wrappers, time synchronization with the robot clock, service readiness
//! waiting, command-with-feedback helpers and service-side header handling.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quadlink::command::{power_on_motors, FeedbackPoller, PowerClient, PowerStub};
//! use quadlink::rpc::ClientCore;
//! use quadlink::time::system_clock;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn power_on(stub: Arc<dyn PowerStub>) -> quadlink::Status {
//!     let client = PowerClient::new(ClientCore::new("my-app", system_clock()));
//!     client.set_comms(stub);
//!     power_on_motors(&client, &FeedbackPoller::new(Duration::from_secs(20), 10.0))
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                             Helpers                                 |
//! |   command (power, dock) | directory (readiness) | header (server)   |
//! +---------------------------------------------------------------------+
//! |                         Service clients                             |
//! |   PowerClient | RobotCommandClient | DockingClient | TimeSyncClient |
//! +---------------------------------------------------------------------+
//! |                          Call layer                                 |
//! |   rpc::dispatch | rpc::response | lease wallet | strip registry     |
//! +---------------------------------------------------------------------+
//! |                        Stub traits                                  |
//! |   one per service, implemented over the caller's transport          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Status`] | Category, code and chained message of every outcome |
//! | [`Condition`] | Category-independent classes (`Success`, `Retryable`, ...) |
//! | [`RpcResult`] | Status plus the response it describes |
//! | [`TimeSyncEndpoint`] | Clock skew estimation against the robot |
//! | [`TimeSyncThread`] | Background worker keeping the estimate fresh |
//!
//! ## Logging
//!
//! The crate logs through the `log` facade with bracketed component prefixes
//! (`[rpc]`, `[time-sync]`, `[readiness]`, ...). No logger is installed.

pub mod api;
pub mod command;
pub mod config;
pub mod directory;
pub mod header;
pub mod lease;
pub mod rpc;
pub mod status;
pub mod strip;
pub mod time;
pub mod time_sync;

pub use config::{ConfigError, SdkConfig};
pub use directory::{wait_for_all_services, ServiceDirectory, WaitResult};
pub use lease::{LeaseWallet, MemoryLeaseWallet};
pub use rpc::{ClientCore, RpcParameters, RpcResult, SharedFuture};
pub use status::{Category, Condition, SdkErrorCode, Status};
pub use time::{Clock, SharedClock};
pub use time_sync::{RobotTimeConverter, TimeSyncEndpoint, TimeSyncThread};
