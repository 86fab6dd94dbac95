//! Package universes - the four places a package name can be known from.
//!
//! Resolution consults the universes in priority order (project first, then
//! extra dependencies, snapshot and global packages). [`PackageUniverse`]
//! exposes each universe separately so that callers keep track of where a
//! package was found.

use std::collections::BTreeMap;

use crate::core::{
    ImmutableLocation, PackageIdentifier, PackageLocation, PackageName, ProjectPackage, Version,
};

/// Read-only view over the package universes.
pub trait PackageUniverse {
    /// Look up a project package.
    fn project(&self, name: PackageName) -> Option<&ProjectPackage>;

    /// All project packages, in name order.
    fn project_packages(&self) -> Box<dyn Iterator<Item = &ProjectPackage> + '_>;

    /// Look up an extra (local) dependency.
    fn local_dep(&self, name: PackageName) -> Option<&PackageLocation>;

    /// Look up a snapshot package.
    fn snapshot(&self, name: PackageName) -> Option<&PackageLocation>;

    /// Look up a toolchain-provided package.
    fn global(&self, name: PackageName) -> Option<&Version>;

    /// Whether the project has no packages at all.
    fn has_no_project_packages(&self) -> bool {
        self.project_packages().next().is_none()
    }

    /// The effective location of `name` outside the project.
    ///
    /// Extra dependencies shadow the snapshot, which shadows global
    /// packages. Global packages are expressed as index locations at their
    /// installed version.
    fn dependency_location(&self, name: PackageName) -> Option<PackageLocation> {
        if let Some(location) = self.local_dep(name).or_else(|| self.snapshot(name)) {
            return Some(location.clone());
        }
        self.global(name).map(|version| {
            let ident = PackageIdentifier::new(name, version.clone());
            PackageLocation::Immutable(ImmutableLocation::index_latest(ident))
        })
    }
}

/// The four universes as separate maps.
#[derive(Debug, Clone, Default)]
pub struct Universes {
    pub project: BTreeMap<PackageName, ProjectPackage>,
    pub local_deps: BTreeMap<PackageName, PackageLocation>,
    pub snapshot: BTreeMap<PackageName, PackageLocation>,
    pub global: BTreeMap<PackageName, Version>,
}

impl Universes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project package.
    pub fn add_project(&mut self, package: ProjectPackage) {
        self.project.insert(package.name(), package);
    }

    /// Non-project packages as a single dependency map.
    ///
    /// Extra dependencies shadow snapshot packages of the same name. Global
    /// packages are not part of it.
    pub fn dependencies(&self) -> BTreeMap<PackageName, PackageLocation> {
        let mut deps = self.snapshot.clone();
        deps.extend(self.local_deps.iter().map(|(n, l)| (*n, l.clone())));
        deps
    }
}

impl PackageUniverse for Universes {
    fn project(&self, name: PackageName) -> Option<&ProjectPackage> {
        self.project.get(&name)
    }

    fn project_packages(&self) -> Box<dyn Iterator<Item = &ProjectPackage> + '_> {
        Box::new(self.project.values())
    }

    fn local_dep(&self, name: PackageName) -> Option<&PackageLocation> {
        self.local_deps.get(&name)
    }

    fn snapshot(&self, name: PackageName) -> Option<&PackageLocation> {
        self.snapshot.get(&name)
    }

    fn global(&self, name: PackageName) -> Option<&Version> {
        self.global.get(&name)
    }
}

/// Where an entry of an actualized dependency map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepOrigin {
    /// Declared as an extra dependency
    Extra,
    /// Pinned by the snapshot
    Snapshot,
}

/// A dependency in an actualized source map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepPackage {
    pub location: PackageLocation,
    pub origin: DepOrigin,
}

/// An actualized source map: project packages, one merged dependency map
/// tagged by origin, and the global packages.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    pub project: BTreeMap<PackageName, ProjectPackage>,
    pub deps: BTreeMap<PackageName, DepPackage>,
    pub global: BTreeMap<PackageName, Version>,
}

impl SourceMap {
    fn dep_from(&self, name: PackageName, origin: DepOrigin) -> Option<&PackageLocation> {
        self.deps
            .get(&name)
            .filter(|dep| dep.origin == origin)
            .map(|dep| &dep.location)
    }
}

impl From<Universes> for SourceMap {
    fn from(u: Universes) -> Self {
        let mut deps: BTreeMap<_, _> = u
            .snapshot
            .into_iter()
            .map(|(name, location)| {
                (
                    name,
                    DepPackage {
                        location,
                        origin: DepOrigin::Snapshot,
                    },
                )
            })
            .collect();

        for (name, location) in u.local_deps {
            deps.insert(
                name,
                DepPackage {
                    location,
                    origin: DepOrigin::Extra,
                },
            );
        }

        SourceMap {
            project: u.project,
            deps,
            global: u.global,
        }
    }
}

impl PackageUniverse for SourceMap {
    fn project(&self, name: PackageName) -> Option<&ProjectPackage> {
        self.project.get(&name)
    }

    fn project_packages(&self) -> Box<dyn Iterator<Item = &ProjectPackage> + '_> {
        Box::new(self.project.values())
    }

    fn local_dep(&self, name: PackageName) -> Option<&PackageLocation> {
        self.dep_from(name, DepOrigin::Extra)
    }

    fn snapshot(&self, name: PackageName) -> Option<&PackageLocation> {
        self.dep_from(name, DepOrigin::Snapshot)
    }

    fn global(&self, name: PackageName) -> Option<&Version> {
        self.global.get(&name)
    }
}
