//! Universe fixtures for tests.

use std::path::PathBuf;

use url::Url;

use crate::core::{
    ImmutableLocation, NamedComponent, PackageIdentifier, PackageLocation, PackageName,
    ProjectPackage, Universes, Version,
};

/// Builder for [`Universes`] in tests.
///
/// Names, versions and components are given as strings and must be valid.
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    universes: Universes,
}

fn name(s: &str) -> PackageName {
    PackageName::new(s).expect("invalid package name in fixture")
}

fn version(s: &str) -> Version {
    Version::parse(s).expect("invalid version in fixture")
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project package rooted at `root`.
    ///
    /// Components use their textual form: `lib`, `exe:NAME`, `test:NAME`, ...
    pub fn project(mut self, pkg: &str, root: impl Into<PathBuf>, components: &[&str]) -> Self {
        let components = components.iter().map(|c| {
            c.parse::<NamedComponent>()
                .expect("invalid component in fixture")
        });
        self.universes
            .add_project(ProjectPackage::new(name(pkg), root, components));
        self
    }

    /// Pin a snapshot package to an index version.
    pub fn snapshot_index(mut self, pkg: &str, ver: &str) -> Self {
        let ident = PackageIdentifier::new(name(pkg), version(ver));
        self.universes.snapshot.insert(
            name(pkg),
            PackageLocation::Immutable(ImmutableLocation::index_latest(ident)),
        );
        self
    }

    /// Pin a snapshot package to an archive.
    pub fn snapshot_archive(mut self, pkg: &str, url: &str) -> Self {
        let url = Url::parse(url).expect("invalid url in fixture");
        self.universes.snapshot.insert(
            name(pkg),
            PackageLocation::Immutable(ImmutableLocation::Archive { url }),
        );
        self
    }

    /// Add an extra dependency from a local directory.
    pub fn local_dir(mut self, pkg: &str, path: impl Into<PathBuf>) -> Self {
        self.universes
            .local_deps
            .insert(name(pkg), PackageLocation::Mutable(path.into()));
        self
    }

    /// Add an extra dependency pinned to an index version.
    pub fn local_index(mut self, pkg: &str, ver: &str) -> Self {
        let ident = PackageIdentifier::new(name(pkg), version(ver));
        self.universes.local_deps.insert(
            name(pkg),
            PackageLocation::Immutable(ImmutableLocation::index_latest(ident)),
        );
        self
    }

    /// Add a toolchain-provided package.
    pub fn global(mut self, pkg: &str, ver: &str) -> Self {
        self.universes.global.insert(name(pkg), version(ver));
        self
    }

    pub fn build(self) -> Universes {
        self.universes
    }
}
