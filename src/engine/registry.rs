use crate::analyzer::Supplier;
use crate::engine::region::{Region, Status};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

const LOG_TARGET: &str = "  registry";

/// Fallback region names used when the analyzer's region source is unavailable.
pub const FALLBACK_REGIONS: [&str; 4] = ["Taiwan", "Japan", "Ukraine", "USA"];

/// Shared store of monitored regions.
///
/// Region order is fixed at initialization and never reordered by updates, so display
/// order stays stable regardless of scan completion order. Every mutation is an atomic
/// replace-or-merge applied under the write lock; readers only ever observe
/// fully-applied updates. No critical section awaits.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: RwLock<Vec<Region>>,
}

impl RegionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the registry, one region per name, all starting safe and unscanned.
    ///
    /// Replaces any previous contents; the given order becomes the fixed iteration order.
    pub fn initialize(&self, names: impl IntoIterator<Item = String>) {
        let regions: Vec<Region> = names.into_iter().map(Region::new).collect();
        log::info!(target: LOG_TARGET, "Monitoring {} region(s)", regions.len());
        *self.write() = regions;
    }

    /// Set or clear a region's scanning flag. Unknown regions are ignored.
    pub fn mark_scanning(&self, name: &str, scanning: bool) {
        let mut regions = self.write();
        match regions.iter_mut().find(|region| region.name == name) {
            Some(region) => region.scanning = scanning,
            None => log::debug!(target: LOG_TARGET, "Ignoring scanning flag for unknown region '{name}'"),
        }
    }

    /// Record a completed scan: overwrite status, score, and suppliers, and clear
    /// the scanning flag, all in one step.
    pub fn apply_scan_result(&self, name: &str, status: Status, risk_score: u8, suppliers: Vec<Supplier>) {
        let mut regions = self.write();
        let Some(region) = regions.iter_mut().find(|region| region.name == name) else {
            log::debug!(target: LOG_TARGET, "Dropping scan result for unknown region '{name}'");
            return;
        };

        region.status = status;
        region.risk_score = Some(risk_score);
        region.suppliers = Some(suppliers);
        region.scanning = false;
    }

    /// Raise a region's status if `status` is strictly more severe than its current
    /// one; otherwise leave it untouched. Score and suppliers are never modified by
    /// this path.
    ///
    /// Commutative and idempotent: applying any sequence of raises yields the maximum
    /// severity seen.
    pub fn raise_status(&self, name: &str, status: Status) {
        let mut regions = self.write();
        let Some(region) = regions.iter_mut().find(|region| region.name == name) else {
            return;
        };

        if status > region.status {
            log::info!(target: LOG_TARGET, "Raising region '{name}' from {} to {status}", region.status);
            region.status = status;
        }
    }

    /// Cloned snapshot of all regions in their fixed order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Region> {
        self.read().clone()
    }

    /// Cloned snapshot of a single region, if known.
    #[must_use]
    pub fn region(&self, name: &str) -> Option<Region> {
        self.read().iter().find(|region| region.name == name).cloned()
    }

    /// Region names in their fixed order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.read().iter().map(|region| region.name.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Mutations never panic while holding the lock, so a poisoned lock still holds
    // consistent data and can be recovered.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Region>> {
        self.regions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Region>> {
        self.regions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
