//! Per-vehicle advisory locks
//!
//! A booking write for a vehicle must hold that vehicle's lock across its
//! read-check-write sequence, so two racing creates (or a create racing an
//! accept) for the same vehicle serialize. Locks for different vehicles are
//! independent.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by vehicle id.
///
/// Entries are created on first use and kept for the process lifetime; the
/// fleet is bounded, so the map never needs eviction.
pub struct VehicleLocks {
    locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl VehicleLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Take the lock for one vehicle, waiting if another task holds it.
    pub async fn lock(&self, vehicle_id: i32) -> OwnedMutexGuard<()> {
        let mutex = self
            .locks
            .entry(vehicle_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }
}

impl Default for VehicleLocks {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn same_vehicle_serializes() {
        let locks = VehicleLocks::new();
        let guard = locks.lock(1).await;

        // A second acquisition must wait while the first guard lives
        let blocked = timeout(Duration::from_millis(50), locks.lock(1)).await;
        assert!(blocked.is_err());

        drop(guard);
        let acquired = timeout(Duration::from_millis(50), locks.lock(1)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn different_vehicles_are_independent() {
        let locks = VehicleLocks::new();
        let _one = locks.lock(1).await;
        let other = timeout(Duration::from_millis(50), locks.lock(2)).await;
        assert!(other.is_ok());
    }
}
