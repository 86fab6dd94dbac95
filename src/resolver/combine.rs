//! Combining resolve results into one target per package.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::{ImmutableLocation, PackageName, RawInput, Target};
use crate::resolver::errors::TargetError;
use crate::resolver::resolve::{Provenance, ResolveResult};

/// The merged outcome of every resolved input.
#[derive(Debug, Default)]
pub struct Combined {
    pub targets: BTreeMap<PackageName, Target>,
    /// Dependency locations that must be added or overridden
    pub added_deps: BTreeMap<PackageName, ImmutableLocation>,
    /// Packages not known to any source, left for build planning to report
    pub unlisted: BTreeSet<PackageName>,
    pub errors: Vec<TargetError>,
}

/// Merge resolve results by package name.
///
/// A package named only as a whole becomes [`Target::All`]; a package named
/// only by components becomes [`Target::Components`] with the union of
/// those components. Naming a package both ways is a conflict, as is
/// requesting two different locations for it.
pub fn combine_resolve_results(results: Vec<ResolveResult>) -> Combined {
    let mut groups: BTreeMap<PackageName, Vec<ResolveResult>> = BTreeMap::new();
    for rr in results {
        groups.entry(rr.name).or_default().push(rr);
    }

    let mut combined = Combined::default();

    for (name, group) in groups {
        match combine_added_deps(name, &group) {
            Ok(Some(location)) => {
                combined.added_deps.insert(name, location);
            }
            Ok(None) => {}
            Err(err) => combined.errors.push(err),
        }

        if group.iter().any(|rr| rr.provenance == Provenance::Unlisted) {
            combined.unlisted.insert(name);
        }

        match combine_group(name, &group) {
            Ok(target) => {
                combined.targets.insert(name, target);
            }
            Err(err) => combined.errors.push(err),
        }
    }

    combined
}

fn combine_group(name: PackageName, group: &[ResolveResult]) -> Result<Target, TargetError> {
    let conflict = || TargetError::ConflictingTargetSpecification {
        package: name,
        inputs: distinct_inputs(group.iter().map(|rr| &rr.raw_input)),
    };

    let Some(first) = group.first() else {
        return Err(conflict());
    };

    if group.iter().all(|rr| rr.component.is_none()) {
        return Ok(Target::All(first.package_type));
    }

    let components: Option<BTreeSet<_>> = group.iter().map(|rr| rr.component.clone()).collect();
    match components {
        Some(components) => Ok(Target::Components(components)),
        None => Err(conflict()),
    }
}

fn combine_added_deps(
    name: PackageName,
    group: &[ResolveResult],
) -> Result<Option<ImmutableLocation>, TargetError> {
    let proposals: Vec<(&RawInput, &ImmutableLocation)> = group
        .iter()
        .filter_map(|rr| rr.added_dep.as_ref().map(|loc| (&rr.raw_input, loc)))
        .collect();

    let mut locations: Vec<&ImmutableLocation> = Vec::new();
    for (_, location) in &proposals {
        if !locations.contains(location) {
            locations.push(*location);
        }
    }

    match locations.as_slice() {
        [] => Ok(None),
        [location] => Ok(Some((*location).clone())),
        _ => Err(TargetError::ConflictingAddedDependency {
            package: name,
            inputs: distinct_inputs(proposals.iter().map(|(input, _)| *input)),
            locations: locations.iter().map(|l| l.to_string()).collect(),
        }),
    }
}

fn distinct_inputs<'a>(inputs: impl Iterator<Item = &'a RawInput>) -> Vec<RawInput> {
    let mut distinct: Vec<RawInput> = Vec::new();
    for input in inputs {
        if !distinct.contains(input) {
            distinct.push(input.clone());
        }
    }
    distinct
}
