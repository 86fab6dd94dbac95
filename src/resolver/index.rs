//! Package index - the source of versions for packages nobody pinned.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use crate::core::{PackageName, Version};

/// A package index that can name the preferred version of a package.
///
/// Queries are single-shot; retries and timeouts belong to the
/// implementation. Implementations are shared across resolution threads.
pub trait PackageIndex: Sync {
    /// The newest version of `name` the index prefers, if it lists any.
    fn latest_preferred_version(&self, name: PackageName) -> Result<Option<Version>>;
}

/// The versions an index lists for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub versions: BTreeSet<Version>,
    /// Versions still available but no longer preferred
    pub deprecated: BTreeSet<Version>,
}

impl IndexEntry {
    /// The newest version that is not deprecated.
    pub fn latest_preferred(&self) -> Option<&Version> {
        self.versions
            .iter()
            .rev()
            .find(|v| !self.deprecated.contains(*v))
    }
}

/// An in-memory index, typically loaded from the `[index]` section of the
/// project file.
#[derive(Debug, Clone, Default)]
pub struct StaticIndex {
    entries: BTreeMap<PackageName, IndexEntry>,
}

impl FromIterator<(PackageName, IndexEntry)> for StaticIndex {
    fn from_iter<T: IntoIterator<Item = (PackageName, IndexEntry)>>(iter: T) -> Self {
        StaticIndex {
            entries: iter.into_iter().collect(),
        }
    }
}

impl PackageIndex for StaticIndex {
    fn latest_preferred_version(&self, name: PackageName) -> Result<Option<Version>> {
        Ok(self
            .entries
            .get(&name)
            .and_then(IndexEntry::latest_preferred)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_latest_preferred_skips_deprecated() {
        let entry = IndexEntry {
            versions: [v("1.2.0"), v("1.10.0"), v("1.3.0")].into(),
            deprecated: [v("1.10.0")].into(),
        };
        assert_eq!(entry.latest_preferred(), Some(&v("1.3.0")));
    }

    #[test]
    fn test_all_deprecated_yields_none() {
        let entry = IndexEntry {
            versions: [v("0.1")].into(),
            deprecated: [v("0.1")].into(),
        };
        assert_eq!(entry.latest_preferred(), None);
    }

    #[test]
    fn test_static_index_lookup() {
        let aeson = PackageName::new("aeson").unwrap();
        let index: StaticIndex = [(
            aeson,
            IndexEntry {
                versions: [v("2.2.1.0")].into(),
                ..Default::default()
            },
        )]
        .into_iter()
        .collect();

        assert_eq!(index.latest_preferred_version(aeson).unwrap(), Some(v("2.2.1.0")));
        let other = PackageName::new("lens").unwrap();
        assert_eq!(index.latest_preferred_version(other).unwrap(), None);
    }
}
