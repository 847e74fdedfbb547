// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Response post-processing.
//!
//! Merges the three places a call can fail into one [`Status`], first
//! finding wins:
//!
//! 1. the transport status,
//! 2. the common error in the response header,
//! 3. the payload status supplied by the caller.

use crate::api::{CommonErrorCode, Response};
use crate::lease::LeaseWallet;
use crate::rpc::TransportStatus;
use crate::status::Status;

/// Final status of a completed call.
pub fn process_response<Rsp: Response>(
    transport: &TransportStatus,
    response: &Rsp,
    success_status: Status,
) -> Status {
    if !transport.is_ok() {
        return transport.to_status();
    }

    if let Some(header) = response.header() {
        match header.error.code {
            CommonErrorCode::Ok => {}
            code => {
                return Status::common(code, String::new()).chain(&header.error.message);
            }
        }
    }

    success_status
}

/// [`process_response`] after handing every lease-use result in the
/// response to `wallet`.
pub fn process_response_with_lease<Rsp: Response>(
    transport: &TransportStatus,
    response: &Rsp,
    success_status: Status,
    wallet: &dyn LeaseWallet,
) -> Status {
    for result in response.lease_use_results() {
        wallet.absorb(result);
    }
    process_response(transport, response, success_status)
}
