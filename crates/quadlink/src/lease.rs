// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Caller-scoped lease wallet.
//!
//! The core only ever asks a wallet for the lease of a resource (when
//! building a command) and hands it the lease-use results a service returns
//! (before the call's status is surfaced).

use crate::api::{Lease, LeaseUseResult, LeaseUseStatus};
use crate::status::{SdkErrorCode, Status};
use dashmap::DashMap;

/// Holder of the leases a client mutates the robot with.
pub trait LeaseWallet: Send + Sync {
    /// Lease to attach to a request for `resource`.
    fn lease_for(&self, resource: &str) -> Option<Lease>;

    /// Absorb one lease-use result returned by a service.
    fn absorb(&self, result: &LeaseUseResult);
}

/// Lease for `resource`, or `Sdk/LeaseNotAvailable`.
pub fn require_lease(wallet: &dyn LeaseWallet, resource: &str) -> Result<Lease, Status> {
    wallet.lease_for(resource).ok_or_else(|| {
        Status::sdk(
            SdkErrorCode::LeaseNotAvailable,
            format!("no lease held for resource \"{}\"", resource),
        )
    })
}

/// In-memory wallet.
///
/// Leases the robot reports as no longer valid are dropped; the newest lease
/// the robot knows about is remembered per resource.
#[derive(Debug, Default)]
pub struct MemoryLeaseWallet {
    held: DashMap<String, Lease>,
    latest_known: DashMap<String, Lease>,
}

impl MemoryLeaseWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the lease for its resource.
    pub fn add(&self, lease: Lease) {
        self.held.insert(lease.resource.clone(), lease);
    }

    /// Drop the lease for `resource`.
    pub fn remove(&self, resource: &str) -> Option<Lease> {
        self.held.remove(resource).map(|(_, lease)| lease)
    }

    /// Newest lease the robot reported for `resource`.
    pub fn latest_known(&self, resource: &str) -> Option<Lease> {
        self.latest_known.get(resource).map(|l| l.value().clone())
    }

    /// Number of held leases.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    fn remember_latest(&self, lease: &Lease) {
        let newer = match self.latest_known.get(&lease.resource) {
            Some(known) => lease.is_newer_than(known.value()) || known.epoch != lease.epoch,
            None => true,
        };
        if newer {
            self.latest_known.insert(lease.resource.clone(), lease.clone());
        }
    }
}

impl LeaseWallet for MemoryLeaseWallet {
    fn lease_for(&self, resource: &str) -> Option<Lease> {
        self.held.get(resource).map(|l| l.value().clone())
    }

    fn absorb(&self, result: &LeaseUseResult) {
        if let Some(latest) = result.latest_known_lease.as_ref() {
            self.remember_latest(latest);
        }

        match result.status {
            LeaseUseStatus::Ok | LeaseUseStatus::Unknown | LeaseUseStatus::Unmanaged => {}
            LeaseUseStatus::Invalid
            | LeaseUseStatus::Older
            | LeaseUseStatus::Revoked
            | LeaseUseStatus::WrongEpoch => {
                let Some(attempted) = result.attempted_lease.as_ref() else {
                    return;
                };
                // Only drop the lease the request used; a newer one may have
                // been added since.
                let stale = self
                    .held
                    .get(&attempted.resource)
                    .is_some_and(|held| held.value() == attempted);
                if stale {
                    self.held.remove(&attempted.resource);
                    log::warn!(
                        "[lease] dropped lease for {} ({:?})",
                        attempted.resource,
                        result.status
                    );
                }
            }
        }
    }
}
