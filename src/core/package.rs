//! Project packages - packages under active development.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::{NamedComponent, PackageName};

/// A package rooted in a local directory and built from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPackage {
    name: PackageName,

    /// Normalized absolute root directory
    root: PathBuf,

    components: BTreeSet<NamedComponent>,
}

impl ProjectPackage {
    pub fn new(
        name: PackageName,
        root: impl Into<PathBuf>,
        components: impl IntoIterator<Item = NamedComponent>,
    ) -> Self {
        ProjectPackage {
            name,
            root: root.into(),
            components: components.into_iter().collect(),
        }
    }

    pub fn name(&self) -> PackageName {
        self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn components(&self) -> &BTreeSet<NamedComponent> {
        &self.components
    }

    /// Components answering to `name` (see [`NamedComponent::is_named`]).
    pub fn components_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a NamedComponent> + 'a {
        self.components.iter().filter(move |c| c.is_named(name))
    }

    /// Whether this package's root is `dir` or lies beneath it.
    pub fn is_under(&self, dir: &Path) -> bool {
        self.root.starts_with(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg() -> ProjectPackage {
        ProjectPackage::new(
            PackageName::new("foo").unwrap(),
            "/work/libs/foo",
            [
                NamedComponent::Library,
                NamedComponent::Executable("foo".into()),
                NamedComponent::TestSuite("foo".into()),
                NamedComponent::Benchmark("bench".into()),
            ],
        )
    }

    #[test]
    fn test_components_named() {
        let p = pkg();
        assert_eq!(p.components_named("foo").count(), 2);
        assert_eq!(p.components_named("bench").count(), 1);
        assert_eq!(p.components_named("lib").count(), 0);
    }

    #[test]
    fn test_is_under_is_component_wise() {
        let p = pkg();
        assert!(p.is_under(Path::new("/work")));
        assert!(p.is_under(Path::new("/work/libs/foo")));
        assert!(!p.is_under(Path::new("/work/libs/fo")));
        assert!(!p.is_under(Path::new("/work/libs/foo/src")));
    }
}
