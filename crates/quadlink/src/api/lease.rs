// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lease messages.

/// Authorization to mutate one robot resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lease {
    /// Resource name, e.g. `"body"`.
    pub resource: String,
    /// Epoch of the lease owner.
    pub epoch: String,
    /// Sub-lease sequence; later leases compare greater.
    pub sequence: Vec<u32>,
    pub client_names: Vec<String>,
}

impl Lease {
    pub fn new(resource: impl Into<String>, epoch: impl Into<String>, sequence: Vec<u32>) -> Self {
        Self {
            resource: resource.into(),
            epoch: epoch.into(),
            sequence,
            client_names: Vec::new(),
        }
    }

    /// True if `self` supersedes `other` (same resource and epoch, newer sequence).
    pub fn is_newer_than(&self, other: &Lease) -> bool {
        self.resource == other.resource && self.epoch == other.epoch && self.sequence > other.sequence
    }
}

/// Outcome of using a lease, returned by lease-aware services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum LeaseUseStatus {
    #[default]
    Unknown = 0,
    Ok = 1,
    Invalid = 2,
    Older = 3,
    Revoked = 4,
    Unmanaged = 5,
    WrongEpoch = 6,
}

/// Per-lease result in a response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaseUseResult {
    pub status: LeaseUseStatus,
    /// Lease the request tried to use.
    pub attempted_lease: Option<Lease>,
    /// Newest lease the service knows about for the resource.
    pub latest_known_lease: Option<Lease>,
}
