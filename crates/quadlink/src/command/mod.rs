// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command services and their blocking command-with-feedback helpers.
//!
//! Each helper issues one command, then polls its feedback through a
//! [`FeedbackPoller`] until the command reaches a terminal state, the
//! poller's deadline passes or its early-end predicate fires.

mod docking;
mod feedback;
mod power;
mod robot;

pub use docking::{blocking_dock, blocking_undock, DockingClient, DockingStub};
pub use feedback::{FeedbackPoller, FeedbackState, PollOutcome};
pub use power::{
    is_powered_on, power_command_with_feedback, power_cycle_robot, power_off_motors,
    power_off_payload_ports, power_off_robot, power_off_wifi_radio, power_on_motors,
    power_on_payload_ports, power_on_wifi_radio, safe_power_off_motors, safe_power_off_robot,
    PowerClient, PowerStub,
};
pub use robot::{RobotCommandClient, RobotCommandStub, RobotStateClient, RobotStateStub};

use crate::api::{Lease, Response};
use crate::lease::LeaseWallet;
use crate::rpc::{process_response, process_response_with_lease, RpcParameters, TransportStatus};
use crate::status::Status;
use std::sync::Arc;
use std::time::Instant;

/// Lease resource guarding mobility and power commands.
pub const BODY_RESOURCE: &str = "body";

/// Attach the wallet's body lease unless the caller already set one.
fn fill_lease(slot: &mut Option<Lease>, wallet: Option<&Arc<dyn LeaseWallet>>) {
    if slot.is_some() {
        return;
    }
    if let Some(wallet) = wallet {
        *slot = wallet.lease_for(BODY_RESOURCE);
        if slot.is_none() {
            log::debug!("[lease] no {} lease held; sending without one", BODY_RESOURCE);
        }
    }
}

/// Post-process a response, feeding its lease results to `wallet` if any.
fn leased_status<Rsp: Response>(
    wallet: Option<&dyn LeaseWallet>,
    transport: &TransportStatus,
    response: &Rsp,
    success_status: Status,
) -> Status {
    match wallet {
        Some(wallet) => process_response_with_lease(transport, response, success_status, wallet),
        None => process_response(transport, response, success_status),
    }
}

/// Parameters for one call made on behalf of a helper bounded by `deadline`.
fn call_params(tag: &str, deadline: Instant) -> RpcParameters {
    RpcParameters::default()
        .with_logging_tag(tag)
        .with_deadline(deadline.saturating_duration_since(Instant::now()))
}
