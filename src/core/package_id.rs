//! Package identification - WHAT package (name + exact version).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PackageName, Version};

/// A package name pinned to one exact version, written `name-version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageIdentifier {
    pub name: PackageName,
    pub version: Version,
}

impl PackageIdentifier {
    pub fn new(name: PackageName, version: Version) -> Self {
        PackageIdentifier { name, version }
    }

    /// Parse `name-version`, splitting at the last `-`.
    ///
    /// Returns `None` unless both halves are valid. Because no name word can
    /// be all digits or contain a `.`, a valid identifier is never also a
    /// valid name.
    pub fn parse(s: &str) -> Option<Self> {
        let (name, version) = s.rsplit_once('-')?;
        let version = Version::parse(version).ok()?;
        let name = PackageName::new(name).ok()?;
        Some(PackageIdentifier { name, version })
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        let id = PackageIdentifier::parse("text-show-3.10.4").unwrap();
        assert_eq!(id.name.as_str(), "text-show");
        assert_eq!(id.version.to_string(), "3.10.4");
        assert_eq!(id.to_string(), "text-show-3.10.4");
    }

    #[test]
    fn test_parse_rejects_non_identifiers() {
        assert!(PackageIdentifier::parse("foo").is_none());
        assert!(PackageIdentifier::parse("foo-bar").is_none());
        assert!(PackageIdentifier::parse("-1.0").is_none());
        assert!(PackageIdentifier::parse("foo-1.0-").is_none());
        assert!(PackageIdentifier::parse("foo:lib-1.0").is_none());
    }

    #[test]
    fn test_identifier_and_name_disjoint() {
        for s in ["foo-1", "foo-1.2.3", "a-b-0.0.1"] {
            assert!(PackageIdentifier::parse(s).is_some());
            assert!(!PackageName::is_valid(s));
        }
    }
}
