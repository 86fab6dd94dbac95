//! Target parsing operation - from command-line strings to a build plan.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::core::{ImmutableLocation, PackageLocation, PackageName, PackageUniverse, Target};
use crate::ops::promote::SnapshotPromoter;
use crate::resolver::{
    combine_resolve_results, normalize_inputs, parse_raw_target_dirs, DirResolver,
    NoTargetsReason, PackageIndex, TargetError, TargetErrors, TargetResolver,
};

/// Whether an empty target set is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeedTargets {
    #[default]
    Need,
    AllowNone,
}

/// How the project was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectMode {
    /// A project file was found
    #[default]
    Explicit,
    /// No project file was found; the user-wide global project is in use
    ImplicitGlobal,
}

/// Options for target parsing.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions {
    /// Target strings as given on the command line
    pub targets: Vec<String>,
    pub need_targets: NeedTargets,
    /// Resolve inputs on the rayon thread pool
    pub parallel: bool,
}

/// Everything target parsing reads from its surroundings.
pub struct TargetEnv<'a, U: ?Sized> {
    /// Directory targets are resolved against
    pub cwd: &'a Path,
    pub mode: ProjectMode,
    pub universe: &'a U,
    pub index: &'a dyn PackageIndex,
    pub dirs: &'a dyn DirResolver,
}

/// The resolved targets before promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedTargets {
    pub targets: BTreeMap<PackageName, Target>,
    /// Dependency locations the targets introduced or overrode
    pub added_deps: BTreeMap<PackageName, ImmutableLocation>,
    /// Packages no source knows about; build planning reports them
    pub unlisted: BTreeSet<PackageName>,
}

/// The final output: targets plus the promoted dependency set.
#[derive(Debug, Clone, Serialize)]
pub struct TargetPlan {
    #[serde(flatten)]
    pub resolved: ResolvedTargets,
    pub deps: BTreeMap<PackageName, PackageLocation>,
}

/// Parse and resolve every target, reporting all errors together.
///
/// Errors from parsing, resolution and combination are collected from every
/// input; any error fails the whole run and no partial result is returned.
pub fn parse_targets<U>(
    opts: &TargetOptions,
    env: &TargetEnv<'_, U>,
) -> Result<ResolvedTargets, TargetErrors>
where
    U: PackageUniverse + Sync + ?Sized,
{
    let inputs = normalize_inputs(&opts.targets, env.universe);
    let explicit = opts.targets.iter().any(|t| !t.trim().is_empty());

    tracing::debug!("resolving {} target input(s)", inputs.len());

    let (raw_targets, mut errors) = partition_results(
        inputs
            .iter()
            .map(|input| parse_raw_target_dirs(input, env.cwd, env.universe, env.dirs)),
    );
    let raw_targets: Vec<_> = raw_targets.into_iter().flatten().collect();

    let resolver = TargetResolver::new(env.universe, env.index);
    let (results, resolve_errors) =
        partition_results(resolver.resolve_all(&raw_targets, opts.parallel));
    errors.extend(resolve_errors);

    let combined = combine_resolve_results(results);
    errors.extend(combined.errors);

    if !errors.is_empty() {
        return Err(TargetErrors(errors));
    }

    if combined.targets.is_empty() && opts.need_targets == NeedTargets::Need {
        let reason = if !explicit && env.mode == ProjectMode::ImplicitGlobal {
            NoTargetsReason::ImplicitGlobal
        } else if !explicit && env.universe.has_no_project_packages() {
            NoTargetsReason::NoProjectPackages
        } else {
            NoTargetsReason::NothingMatched
        };
        return Err(TargetErrors(vec![TargetError::NoTargetsMatched { reason }]));
    }

    for name in &combined.unlisted {
        tracing::debug!("`{}` left for build planning to report", name);
    }

    tracing::info!(
        "resolved {} target(s), {} added dependenc{}",
        combined.targets.len(),
        combined.added_deps.len(),
        if combined.added_deps.len() == 1 { "y" } else { "ies" }
    );

    Ok(ResolvedTargets {
        targets: combined.targets,
        added_deps: combined.added_deps,
        unlisted: combined.unlisted,
    })
}

/// Parse targets and hand the result to the snapshot promoter.
///
/// A [`TargetErrors`] failure is returned inside the `anyhow::Error` so that
/// callers can downcast it and render each error.
pub fn plan_targets<U>(
    opts: &TargetOptions,
    env: &TargetEnv<'_, U>,
    deps: BTreeMap<PackageName, PackageLocation>,
    promoter: &dyn SnapshotPromoter,
) -> Result<TargetPlan>
where
    U: PackageUniverse + Sync + ?Sized,
{
    let resolved = parse_targets(opts, env)?;
    let deps = promoter.promote(&resolved.targets, deps, &resolved.added_deps)?;
    Ok(TargetPlan { resolved, deps })
}

fn partition_results<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut oks = Vec::new();
    let mut errs = Vec::new();
    for result in results {
        match result {
            Ok(v) => oks.push(v),
            Err(e) => errs.push(e),
        }
    }
    (oks, errs)
}
