//! Raw target parsing - the structural reading of command-line tokens.
//!
//! Parsing is pure: it looks only at the token text. Tokens that are not
//! target syntax are handed back to the caller, which tries them as
//! directories.

use crate::core::{
    ComponentSpec, FileInfo, NamedComponent, PackageIdentifier, PackageName, PackageUniverse,
    RawInput, RawTarget,
};

/// Turn command-line target strings into raw inputs.
///
/// Each string is split on whitespace and empty pieces are dropped. With
/// no targets at all, every project package is named, in name order.
pub fn normalize_inputs<U>(targets: &[String], universe: &U) -> Vec<RawInput>
where
    U: PackageUniverse + ?Sized,
{
    let inputs: Vec<RawInput> = targets
        .iter()
        .flat_map(|t| t.split_whitespace())
        .map(RawInput::new)
        .collect();

    if !inputs.is_empty() {
        return inputs;
    }

    universe
        .project_packages()
        .map(|pkg| RawInput::new(pkg.name().as_str()))
        .collect()
}

/// Parse one token into a [`RawTarget`].
///
/// Returns `None` when the token is not target syntax. The forms are tried
/// in order, and the first match wins:
///
/// 1. `name-version[@rev:N | @sha256:HASH[,SIZE]]`
/// 2. `name`
/// 3. `:component`
/// 4. `name:lib`, `name:component`, `name:exe|test|bench:component`
pub fn parse_raw_target(token: &str) -> Option<RawTarget> {
    if let Some((ident, file_info)) = parse_identifier(token) {
        return Some(RawTarget::PackageWithVersion(ident, file_info));
    }

    if let Ok(name) = PackageName::new(token) {
        return Some(RawTarget::PackageOnly(name));
    }

    if let Some(component) = token.strip_prefix(':') {
        if !component.is_empty() {
            return Some(RawTarget::BareComponent(component.to_string()));
        }
    }

    parse_package_component(token)
}

fn parse_identifier(token: &str) -> Option<(PackageIdentifier, FileInfo)> {
    match token.rsplit_once('@') {
        Some((ident, qualifier)) => {
            let ident = PackageIdentifier::parse(ident)?;
            let file_info = FileInfo::parse(qualifier)?;
            Some((ident, file_info))
        }
        None => PackageIdentifier::parse(token).map(|ident| (ident, FileInfo::Latest)),
    }
}

fn parse_package_component(token: &str) -> Option<RawTarget> {
    let parts: Vec<&str> = token.split(':').collect();

    let (package, spec) = match parts.as_slice() {
        [package, "lib"] => (*package, ComponentSpec::Resolved(NamedComponent::Library)),
        [package, name] if !name.is_empty() => {
            (*package, ComponentSpec::Unresolved(name.to_string()))
        }
        [package, kind, name] if !name.is_empty() => {
            let name = name.to_string();
            let component = match *kind {
                "exe" => NamedComponent::Executable(name),
                "test" => NamedComponent::TestSuite(name),
                "bench" => NamedComponent::Benchmark(name),
                _ => return None,
            };
            (*package, ComponentSpec::Resolved(component))
        }
        _ => return None,
    };

    let package = PackageName::new(package).ok()?;
    Some(RawTarget::PackageWithComponent(package, spec))
}
