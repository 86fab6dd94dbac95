//! Directory targets - tokens that name a path instead of a package.

use std::path::{Path, PathBuf};

use crate::core::{PackageUniverse, RawInput, RawTarget};
use crate::resolver::errors::TargetError;
use crate::resolver::parse::parse_raw_target;

/// Resolves target tokens as directories.
pub trait DirResolver: Sync {
    /// Resolve `token` against `base`.
    ///
    /// Returns the normalized absolute path, or `None` when it does not exist
    /// or is not a directory.
    fn resolve_dir(&self, base: &Path, token: &str) -> Option<PathBuf>;
}

/// Resolves directories on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealDirs;

impl DirResolver for RealDirs {
    fn resolve_dir(&self, base: &Path, token: &str) -> Option<PathBuf> {
        let path = std::fs::canonicalize(base.join(token)).ok()?;
        path.is_dir().then_some(path)
    }
}

/// Parse one input, falling back to directory expansion.
///
/// Directory expansion yields one package target per project package rooted
/// at or below the directory, all attributed to the same input.
pub fn parse_raw_target_dirs<U, D>(
    input: &RawInput,
    cwd: &Path,
    universe: &U,
    dirs: &D,
) -> Result<Vec<(RawInput, RawTarget)>, TargetError>
where
    U: PackageUniverse + ?Sized,
    D: DirResolver + ?Sized,
{
    if let Some(target) = parse_raw_target(input.as_str()) {
        tracing::debug!("target `{}` parsed as {:?}", input, target);
        return Ok(vec![(input.clone(), target)]);
    }

    let dir = dirs
        .resolve_dir(cwd, input.as_str())
        .ok_or_else(|| TargetError::DirectoryNotFound {
            input: input.clone(),
        })?;

    let targets: Vec<_> = universe
        .project_packages()
        .filter(|pkg| pkg.is_under(&dir))
        .map(|pkg| (input.clone(), RawTarget::PackageOnly(pkg.name())))
        .collect();

    if targets.is_empty() {
        return Err(TargetError::NoDirectoryMatch {
            input: input.clone(),
            dir,
        });
    }

    tracing::debug!(
        "directory `{}` expanded to {} package(s)",
        input,
        targets.len()
    );
    Ok(targets)
}
