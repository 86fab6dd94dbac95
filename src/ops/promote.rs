//! Snapshot promotion - folding newly requested dependencies into the
//! dependency set once the targets are known.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::{ImmutableLocation, PackageLocation, PackageName, Target};

/// Upgrades the dependency set for a chosen set of targets.
pub trait SnapshotPromoter {
    /// Return the dependency set to build `targets` with.
    ///
    /// `added` holds the locations the targets introduced or overrode.
    fn promote(
        &self,
        targets: &BTreeMap<PackageName, Target>,
        deps: BTreeMap<PackageName, PackageLocation>,
        added: &BTreeMap<PackageName, ImmutableLocation>,
    ) -> Result<BTreeMap<PackageName, PackageLocation>>;
}

/// Applies added locations over the existing dependencies and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddedDepsPromoter;

impl SnapshotPromoter for AddedDepsPromoter {
    fn promote(
        &self,
        _targets: &BTreeMap<PackageName, Target>,
        mut deps: BTreeMap<PackageName, PackageLocation>,
        added: &BTreeMap<PackageName, ImmutableLocation>,
    ) -> Result<BTreeMap<PackageName, PackageLocation>> {
        for (name, location) in added {
            let location_entry = PackageLocation::Immutable(location.clone());
            if let Some(previous) = deps.insert(*name, location_entry) {
                tracing::info!("overriding {} with {}", previous, location);
            }
        }
        Ok(deps)
    }
}
