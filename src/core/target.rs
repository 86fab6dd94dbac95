//! Target definitions - what the user asked to build.
//!
//! A [`RawTarget`] is the structural reading of one command-line token. A
//! [`Target`] is the final, conflict-checked instruction for one package.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::core::{FileInfo, NamedComponent, PackageIdentifier, PackageName};

/// The original text of one command-line target, kept for error messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RawInput(String);

impl RawInput {
    pub fn new(s: impl Into<String>) -> Self {
        RawInput(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A component reference whose kind may not be known yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentSpec {
    /// Kind and name were spelled out (`pkg:lib`, `pkg:exe:name`)
    Resolved(NamedComponent),
    /// Only a name was given (`pkg:name`)
    Unresolved(String),
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentSpec::Resolved(comp) => write!(f, "{}", comp),
            ComponentSpec::Unresolved(name) => f.write_str(name),
        }
    }
}

/// The structural form of one target token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawTarget {
    /// `pkg`
    PackageOnly(PackageName),
    /// `pkg:lib`, `pkg:name`, `pkg:exe:name`, ...
    PackageWithComponent(PackageName, ComponentSpec),
    /// `:name`
    BareComponent(String),
    /// `pkg-1.2.3`, optionally qualified with `@rev:N` or `@sha256:...`
    PackageWithVersion(PackageIdentifier, FileInfo),
}

/// Whether a package is under development or pulled in as a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Project,
    Dependency,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::Project => f.write_str("project"),
            PackageType::Dependency => f.write_str("dependency"),
        }
    }
}

/// The authoritative build instruction for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "build", content = "value", rename_all = "lowercase")]
pub enum Target {
    /// Build everything the package provides
    All(PackageType),
    /// Build only these components (never empty)
    Components(BTreeSet<NamedComponent>),
}

impl Target {
    pub fn package_type(&self) -> PackageType {
        match self {
            Target::All(ty) => *ty,
            // Components can only be named on project packages
            Target::Components(_) => PackageType::Project,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All(ty) => write!(f, "all ({})", ty),
            Target::Components(comps) => {
                let names: Vec<_> = comps.iter().map(|c| c.to_string()).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        let mut comps = BTreeSet::new();
        comps.insert(NamedComponent::TestSuite("spec".into()));
        comps.insert(NamedComponent::Library);
        assert_eq!(Target::Components(comps).to_string(), "lib, test:spec");
        assert_eq!(
            Target::All(PackageType::Dependency).to_string(),
            "all (dependency)"
        );
    }

    #[test]
    fn test_component_targets_are_project() {
        let comps = BTreeSet::from([NamedComponent::Executable("app".into())]);
        assert_eq!(Target::Components(comps).package_type(), PackageType::Project);
    }
}
