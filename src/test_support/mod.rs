//! Test utilities and mocks for Quay unit tests.
//!
//! This module provides mock implementations of the collaborators target
//! resolution consults: the filesystem (for directory targets) and the
//! package index.
//!
//! # Example
//!
//! ```rust,ignore
//! use quay::test_support::{MockDirs, MockIndex, UniverseBuilder};
//!
//! #[test]
//! fn test_example() {
//!     let universe = UniverseBuilder::new()
//!         .project("foo", "/w/foo", &["lib", "test:spec"])
//!         .build();
//!     let index = MockIndex::new().with_version("lens", "5.2.3");
//!     let dirs = MockDirs::new().with_dir("/w", "./foo", "/w/foo");
//!
//!     // Use mocks in tests...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};

use crate::core::{PackageName, Version};
use crate::resolver::{DirResolver, PackageIndex};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock directory resolver.
///
/// Only the `(base, token)` pairs registered with [`MockDirs::with_dir`]
/// resolve; everything else is treated as missing.
#[derive(Debug, Default)]
pub struct MockDirs {
    dirs: HashMap<(PathBuf, String), PathBuf>,
    queries: AtomicUsize,
}

impl MockDirs {
    /// Create a resolver where no directory exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `token`, relative to `base`, resolve to `resolved`.
    pub fn with_dir(
        mut self,
        base: impl Into<PathBuf>,
        token: impl Into<String>,
        resolved: impl Into<PathBuf>,
    ) -> Self {
        self.dirs
            .insert((base.into(), token.into()), resolved.into());
        self
    }

    /// Number of lookups made so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl DirResolver for MockDirs {
    fn resolve_dir(&self, base: &Path, token: &str) -> Option<PathBuf> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.dirs
            .get(&(base.to_path_buf(), token.to_string()))
            .cloned()
    }
}

/// Mock package index.
#[derive(Debug, Default)]
pub struct MockIndex {
    versions: HashMap<PackageName, Version>,
    failure: Option<String>,
    queries: AtomicUsize,
}

impl MockIndex {
    /// Create an index that knows no packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest preferred version of a package.
    pub fn with_version(mut self, name: &str, version: &str) -> Self {
        let name = PackageName::new(name).expect("invalid package name in test");
        let version = Version::parse(version).expect("invalid version in test");
        self.versions.insert(name, version);
        self
    }

    /// Make every query fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of queries made so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl PackageIndex for MockIndex {
    fn latest_preferred_version(&self, name: PackageName) -> Result<Option<Version>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            bail!("{}", message);
        }
        Ok(self.versions.get(&name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_dirs() {
        let dirs = MockDirs::new().with_dir("/w", "./foo", "/w/foo");
        assert_eq!(
            dirs.resolve_dir(Path::new("/w"), "./foo"),
            Some(PathBuf::from("/w/foo"))
        );
        assert_eq!(dirs.resolve_dir(Path::new("/x"), "./foo"), None);
        assert_eq!(dirs.queries(), 2);
    }

    #[test]
    fn test_mock_index() {
        let index = MockIndex::new().with_version("lens", "5.2.3");
        let lens = PackageName::new("lens").unwrap();
        let other = PackageName::new("other").unwrap();

        assert_eq!(
            index.latest_preferred_version(lens).unwrap(),
            Version::parse("5.2.3").ok()
        );
        assert_eq!(index.latest_preferred_version(other).unwrap(), None);
        assert_eq!(index.queries(), 2);
    }

    #[test]
    fn test_mock_index_failure() {
        let index = MockIndex::new().failing("offline");
        let lens = PackageName::new("lens").unwrap();
        let err = index.latest_preferred_version(lens).unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
