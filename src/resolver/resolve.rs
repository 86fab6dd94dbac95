//! Target resolution - deciding what a raw target means.
//!
//! The resolver maps each `(input, RawTarget)` pair to a [`ResolveResult`]
//! against the package universes and the package index. It never mutates
//! either, so inputs can be resolved in parallel.

use rayon::prelude::*;

use crate::core::{
    ComponentSpec, FileInfo, ImmutableLocation, NamedComponent, PackageIdentifier,
    PackageLocation, PackageName, PackageType, PackageUniverse, RawInput, RawTarget,
};
use crate::resolver::errors::TargetError;
use crate::resolver::index::PackageIndex;

/// Where a resolved package was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Project,
    LocalDep,
    Snapshot,
    Global,
    /// Not known locally; a new index location was added for it
    Index,
    /// Not known anywhere, and the index has no version for it either.
    /// Reported later by build planning, together with other missing packages.
    Unlisted,
}

/// The meaning of one resolved input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub name: PackageName,
    /// The input this came from, for error messages
    pub raw_input: RawInput,
    /// The component to build, or `None` for the whole package
    pub component: Option<NamedComponent>,
    /// A location that must be added to the dependencies
    pub added_dep: Option<ImmutableLocation>,
    pub package_type: PackageType,
    pub provenance: Provenance,
}

impl ResolveResult {
    fn project(name: PackageName, input: &RawInput, component: Option<NamedComponent>) -> Self {
        ResolveResult {
            name,
            raw_input: input.clone(),
            component,
            added_dep: None,
            package_type: PackageType::Project,
            provenance: Provenance::Project,
        }
    }

    fn dependency(
        name: PackageName,
        input: &RawInput,
        provenance: Provenance,
        added_dep: Option<ImmutableLocation>,
    ) -> Self {
        ResolveResult {
            name,
            raw_input: input.clone(),
            component: None,
            added_dep,
            package_type: PackageType::Dependency,
            provenance,
        }
    }
}

/// Resolves raw targets against a package universe and an index.
pub struct TargetResolver<'a, U: ?Sized, I: ?Sized> {
    universe: &'a U,
    index: &'a I,
}

impl<'a, U, I> TargetResolver<'a, U, I>
where
    U: PackageUniverse + ?Sized,
    I: PackageIndex + ?Sized,
{
    pub fn new(universe: &'a U, index: &'a I) -> Self {
        TargetResolver { universe, index }
    }

    /// Resolve one raw target.
    pub fn resolve(
        &self,
        input: &RawInput,
        target: &RawTarget,
    ) -> Result<ResolveResult, TargetError> {
        let result = match target {
            RawTarget::BareComponent(cname) => self.resolve_bare_component(input, cname),
            RawTarget::PackageWithComponent(name, spec) => {
                self.resolve_package_component(input, *name, spec)
            }
            RawTarget::PackageOnly(name) => self.resolve_package(input, *name),
            RawTarget::PackageWithVersion(ident, file_info) => {
                self.resolve_identifier(input, ident, file_info)
            }
        }?;

        tracing::debug!(
            "resolved `{}` to {} ({:?}{})",
            input,
            result.name,
            result.provenance,
            result
                .component
                .as_ref()
                .map(|c| format!(", {}", c))
                .unwrap_or_default()
        );

        Ok(result)
    }

    /// Resolve every target, keeping input order.
    ///
    /// Errors are returned alongside successes so that callers can report
    /// all of them at once.
    pub fn resolve_all(
        &self,
        targets: &[(RawInput, RawTarget)],
        parallel: bool,
    ) -> Vec<Result<ResolveResult, TargetError>>
    where
        U: Sync,
    {
        if parallel {
            targets
                .par_iter()
                .map(|(input, target)| self.resolve(input, target))
                .collect()
        } else {
            targets
                .iter()
                .map(|(input, target)| self.resolve(input, target))
                .collect()
        }
    }

    fn resolve_bare_component(
        &self,
        input: &RawInput,
        cname: &str,
    ) -> Result<ResolveResult, TargetError> {
        let matches: Vec<(PackageName, &NamedComponent)> = self
            .universe
            .project_packages()
            .flat_map(|pkg| pkg.components_named(cname).map(move |c| (pkg.name(), c)))
            .collect();

        match matches.as_slice() {
            [] => Err(TargetError::NotALocalTarget {
                input: input.clone(),
                component: cname.to_string(),
            }),
            [(name, component)] => Ok(ResolveResult::project(
                *name,
                input,
                Some((*component).clone()),
            )),
            _ => Err(TargetError::AmbiguousComponent {
                input: input.clone(),
                component: cname.to_string(),
                matches: matches
                    .iter()
                    .map(|(name, comp)| format!("{}:{}", name, comp))
                    .collect(),
            }),
        }
    }

    fn resolve_package_component(
        &self,
        input: &RawInput,
        name: PackageName,
        spec: &ComponentSpec,
    ) -> Result<ResolveResult, TargetError> {
        let Some(pkg) = self.universe.project(name) else {
            return Err(TargetError::UnknownLocalPackage {
                input: input.clone(),
                package: name,
                is_dependency: self.dependency_provenance(name).is_some(),
            });
        };

        let not_found = || TargetError::ComponentNotFound {
            input: input.clone(),
            package: name,
            component: spec.to_string(),
            available: pkg.components().iter().map(|c| c.to_string()).collect(),
        };

        let component = match spec {
            ComponentSpec::Resolved(component) => {
                if !pkg.components().contains(component) {
                    return Err(not_found());
                }
                component.clone()
            }
            ComponentSpec::Unresolved(cname) => {
                let named: Vec<_> = pkg.components_named(cname).collect();
                match named.as_slice() {
                    [] => return Err(not_found()),
                    [component] => (*component).clone(),
                    _ => {
                        return Err(TargetError::AmbiguousComponent {
                            input: input.clone(),
                            component: cname.clone(),
                            matches: named.iter().map(|c| format!("{}:{}", name, c)).collect(),
                        })
                    }
                }
            }
        };

        Ok(ResolveResult::project(name, input, Some(component)))
    }

    fn resolve_package(
        &self,
        input: &RawInput,
        name: PackageName,
    ) -> Result<ResolveResult, TargetError> {
        if self.universe.project(name).is_some() {
            return Ok(ResolveResult::project(name, input, None));
        }

        if let Some(provenance) = self.dependency_provenance(name) {
            return Ok(ResolveResult::dependency(name, input, provenance, None));
        }

        let latest = self
            .index
            .latest_preferred_version(name)
            .map_err(|e| TargetError::IndexQuery {
                input: input.clone(),
                package: name,
                message: format!("{:#}", e),
            })?;

        match latest {
            Some(version) => {
                let ident = PackageIdentifier::new(name, version);
                Ok(ResolveResult::dependency(
                    name,
                    input,
                    Provenance::Index,
                    Some(ImmutableLocation::index_latest(ident)),
                ))
            }
            None => {
                // Build planning reports this along with every other missing package
                tracing::warn!("package `{}` is not known to any source or the index", name);
                Ok(ResolveResult::dependency(name, input, Provenance::Unlisted, None))
            }
        }
    }

    fn resolve_identifier(
        &self,
        input: &RawInput,
        ident: &PackageIdentifier,
        file_info: &FileInfo,
    ) -> Result<ResolveResult, TargetError> {
        let name = ident.name;

        if self.universe.project(name).is_some() {
            return Err(TargetError::LocalPackageVersionConflict {
                input: input.clone(),
                package: name,
            });
        }

        let requested = ImmutableLocation::Index {
            ident: ident.clone(),
            file_info: file_info.clone(),
        };

        let Some(known) = self.universe.dependency_location(name) else {
            return Ok(ResolveResult::dependency(
                name,
                input,
                Provenance::Index,
                Some(requested),
            ));
        };

        match known.as_immutable().and_then(ImmutableLocation::as_index) {
            Some((known_ident, known_info))
                if known_ident.version == ident.version
                    && (file_info.is_latest() || file_info == known_info) =>
            {
                let provenance = self
                    .dependency_provenance(name)
                    .unwrap_or(Provenance::Snapshot);
                Ok(ResolveResult::dependency(name, input, provenance, None))
            }
            Some(_) => {
                tracing::debug!("overriding `{}` with {}", known, requested);
                Ok(ResolveResult::dependency(
                    name,
                    input,
                    Provenance::Index,
                    Some(requested),
                ))
            }
            None => Err(TargetError::NonIndexOverrideRefused {
                input: input.clone(),
                package: name,
                location: describe_location(&known),
            }),
        }
    }

    /// The non-project universe `name` is found in, in shadowing order.
    fn dependency_provenance(&self, name: PackageName) -> Option<Provenance> {
        if self.universe.local_dep(name).is_some() {
            Some(Provenance::LocalDep)
        } else if self.universe.snapshot(name).is_some() {
            Some(Provenance::Snapshot)
        } else if self.universe.global(name).is_some() {
            Some(Provenance::Global)
        } else {
            None
        }
    }
}

fn describe_location(location: &PackageLocation) -> String {
    match location {
        PackageLocation::Mutable(dir) => format!("the local directory {}", dir.display()),
        PackageLocation::Immutable(loc) => loc.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SourceMap, Universes, Version};
    use crate::test_support::{MockIndex, UniverseBuilder};

    fn name(s: &str) -> PackageName {
        PackageName::new(s).unwrap()
    }

    fn ident(s: &str) -> PackageIdentifier {
        PackageIdentifier::parse(s).unwrap()
    }

    fn universe() -> Universes {
        UniverseBuilder::new()
            .project("foo", "/w/foo", &["lib", "exe:foo", "test:spec", "bench:perf"])
            .project("a", "/w/a", &["lib", "exe:qux"])
            .project("b", "/w/b", &["lib", "test:qux"])
            .snapshot_index("bar", "1.2.0")
            .snapshot_archive("tarball", "https://example.com/tarball-1.0.tar.gz")
            .local_dir("forked", "/src/forked")
            .global("base", "4.18.0")
            .build()
    }

    fn resolve_in<U: PackageUniverse>(
        universe: &U,
        index: &MockIndex,
        token: &str,
    ) -> Result<ResolveResult, TargetError> {
        let target = crate::resolver::parse::parse_raw_target(token).unwrap();
        TargetResolver::new(universe, index).resolve(&RawInput::new(token), &target)
    }

    fn resolve(token: &str) -> Result<ResolveResult, TargetError> {
        resolve_in(&universe(), &MockIndex::new(), token)
    }

    #[test]
    fn test_bare_component_unique() {
        let rr = resolve(":spec").unwrap();
        assert_eq!(rr.name, name("foo"));
        assert_eq!(rr.component, Some(NamedComponent::TestSuite("spec".into())));
        assert_eq!(rr.package_type, PackageType::Project);
    }

    #[test]
    fn test_bare_component_ambiguous_lists_all() {
        match resolve(":qux").unwrap_err() {
            TargetError::AmbiguousComponent { matches, .. } => {
                assert_eq!(matches, vec!["a:exe:qux", "b:test:qux"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bare_component_missing() {
        assert!(matches!(
            resolve(":nothing").unwrap_err(),
            TargetError::NotALocalTarget { .. }
        ));
    }

    #[test]
    fn test_resolved_component() {
        let rr = resolve("foo:test:spec").unwrap();
        assert_eq!(rr.component, Some(NamedComponent::TestSuite("spec".into())));
        assert_eq!(rr.added_dep, None);

        let rr = resolve("foo:lib").unwrap();
        assert_eq!(rr.component, Some(NamedComponent::Library));
    }

    #[test]
    fn test_resolved_component_missing_lists_available() {
        match resolve("foo:exe:server").unwrap_err() {
            TargetError::ComponentNotFound {
                component,
                available,
                ..
            } => {
                assert_eq!(component, "exe:server");
                assert!(available.contains(&"test:spec".to_string()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_component() {
        let rr = resolve("foo:perf").unwrap();
        assert_eq!(rr.component, Some(NamedComponent::Benchmark("perf".into())));
    }

    #[test]
    fn test_unresolved_component_ambiguous_within_package() {
        let universe = UniverseBuilder::new()
            .project("foo", "/w/foo", &["exe:foo", "test:foo"])
            .build();
        let err = resolve_in(&universe, &MockIndex::new(), "foo:foo").unwrap_err();
        match err {
            TargetError::AmbiguousComponent { matches, .. } => {
                assert_eq!(matches, vec!["foo:exe:foo", "foo:test:foo"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_component_of_dependency_rejected() {
        match resolve("bar:lib").unwrap_err() {
            TargetError::UnknownLocalPackage { is_dependency, .. } => assert!(is_dependency),
            other => panic!("unexpected {:?}", other),
        }
        match resolve("nope:exe:x").unwrap_err() {
            TargetError::UnknownLocalPackage { is_dependency, .. } => assert!(!is_dependency),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_project_takes_priority() {
        let universe = UniverseBuilder::new()
            .project("foo", "/w/foo", &["lib"])
            .snapshot_index("foo", "1.0")
            .global("foo", "0.9")
            .local_dir("foo", "/elsewhere/foo")
            .build();
        let index = MockIndex::new().with_version("foo", "2.0");
        let rr = resolve_in(&universe, &index, "foo").unwrap();
        assert_eq!(rr.package_type, PackageType::Project);
        assert_eq!(rr.added_dep, None);
        assert_eq!(index.queries(), 0);
    }

    #[test]
    fn test_known_dependency_needs_nothing() {
        for (token, provenance) in [
            ("bar", Provenance::Snapshot),
            ("base", Provenance::Global),
            ("forked", Provenance::LocalDep),
        ] {
            let rr = resolve(token).unwrap();
            assert_eq!(rr.package_type, PackageType::Dependency);
            assert_eq!(rr.added_dep, None);
            assert_eq!(rr.provenance, provenance);
        }
    }

    #[test]
    fn test_unknown_package_added_from_index() {
        let index = MockIndex::new().with_version("lens", "5.2.3");
        let rr = resolve_in(&universe(), &index, "lens").unwrap();
        assert_eq!(rr.provenance, Provenance::Index);
        assert_eq!(
            rr.added_dep,
            Some(ImmutableLocation::index_latest(ident("lens-5.2.3")))
        );
    }

    #[test]
    fn test_unlisted_package_is_deferred() {
        let rr = resolve("does-not-exist").unwrap();
        assert_eq!(rr.package_type, PackageType::Dependency);
        assert_eq!(rr.added_dep, None);
        assert_eq!(rr.provenance, Provenance::Unlisted);
    }

    #[test]
    fn test_index_failure_is_reported() {
        let index = MockIndex::new().failing("index unavailable");
        let err = resolve_in(&universe(), &index, "lens").unwrap_err();
        match err {
            TargetError::IndexQuery { message, .. } => assert!(message.contains("unavailable")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_identifier_for_unknown_package() {
        let rr = resolve("new-pkg-1.2.0").unwrap();
        assert_eq!(rr.name, name("new-pkg"));
        assert_eq!(
            rr.added_dep,
            Some(ImmutableLocation::index_latest(ident("new-pkg-1.2.0")))
        );
    }

    #[test]
    fn test_identifier_already_satisfied() {
        let rr = resolve("bar-1.2.0").unwrap();
        assert_eq!(rr.added_dep, None);
        assert_eq!(rr.provenance, Provenance::Snapshot);
    }

    #[test]
    fn test_identifier_satisfied_by_extra_dep() {
        let universe = UniverseBuilder::new()
            .snapshot_index("aeson", "2.1.0")
            .local_index("aeson", "2.2.0")
            .build();
        let rr = resolve_in(&universe, &MockIndex::new(), "aeson-2.2.0").unwrap();
        assert_eq!(rr.added_dep, None);
        assert_eq!(rr.provenance, Provenance::LocalDep);

        // The shadowed snapshot version is an override
        let rr = resolve_in(&universe, &MockIndex::new(), "aeson-2.1.0").unwrap();
        assert_eq!(rr.provenance, Provenance::Index);
    }

    #[test]
    fn test_identifier_overrides_other_version() {
        let rr = resolve("bar-1.3.0").unwrap();
        assert_eq!(
            rr.added_dep,
            Some(ImmutableLocation::index_latest(ident("bar-1.3.0")))
        );

        // Global packages can be overridden too
        let rr = resolve("base-4.19.0").unwrap();
        assert_eq!(rr.provenance, Provenance::Index);
    }

    #[test]
    fn test_identifier_with_other_revision_overrides() {
        let rr = resolve("bar-1.2.0@rev:2").unwrap();
        assert_eq!(
            rr.added_dep,
            Some(ImmutableLocation::Index {
                ident: ident("bar-1.2.0"),
                file_info: FileInfo::Revision(2),
            })
        );
    }

    #[test]
    fn test_identifier_for_project_package() {
        let err = resolve("foo-1.0").unwrap_err();
        assert_eq!(
            err,
            TargetError::LocalPackageVersionConflict {
                input: RawInput::new("foo-1.0"),
                package: name("foo"),
            }
        );
    }

    #[test]
    fn test_identifier_for_non_index_location() {
        for token in ["tarball-1.0", "forked-2.0"] {
            assert!(matches!(
                resolve(token).unwrap_err(),
                TargetError::NonIndexOverrideRefused { .. }
            ));
        }
    }

    #[test]
    fn test_source_map_resolves_identically() {
        let universes = universe();
        let source_map = SourceMap::from(universes.clone());
        let index = MockIndex::new().with_version("lens", "5.2.3");

        let tokens = [
            ":spec", "foo:perf", "bar", "base", "lens", "bar-1.3.0", "tarball-1.0", "x",
        ];
        for token in tokens {
            assert_eq!(
                resolve_in(&universes, &index, token),
                resolve_in(&source_map, &index, token),
                "{token}"
            );
        }
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let universe = universe();
        let index = MockIndex::new();
        let resolver = TargetResolver::new(&universe, &index);
        let targets: Vec<_> = ["foo", ":qux", "bar", "base"]
            .iter()
            .map(|t| {
                (
                    RawInput::new(*t),
                    crate::resolver::parse::parse_raw_target(t).unwrap(),
                )
            })
            .collect();

        let results = resolver.resolve_all(&targets, true);
        assert_eq!(results.len(), 4);
        assert!(results[1].is_err());
        let names: Vec<_> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|rr| rr.name.as_str())
            .collect();
        assert_eq!(names, vec!["foo", "bar", "base"]);
        assert_eq!(results, resolver.resolve_all(&targets, false));
    }

    #[test]
    fn test_version_type_in_added_dep() {
        let rr = resolve("aeson-2.2.1.0").unwrap();
        let version = rr.added_dep.as_ref().and_then(|l| l.version()).cloned();
        assert_eq!(version, Version::parse("2.2.1.0").ok());
    }
}
