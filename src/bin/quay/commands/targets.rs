//! `quay targets` command

use anyhow::Result;

use crate::cli::TargetsArgs;
use quay::core::PackageUniverse;
use quay::ops::{plan_targets, AddedDepsPromoter, NeedTargets, TargetEnv, TargetOptions, TargetPlan};
use quay::resolver::RealDirs;
use quay::util::diagnostic::{self, Diagnostic};
use quay::util::GlobalContext;

pub fn execute(args: TargetsArgs, ctx: &GlobalContext) -> Result<()> {
    let project = ctx.load_project(args.project.as_deref())?;
    let settings = ctx.settings(&project);

    let opts = TargetOptions {
        targets: args.targets,
        need_targets: if args.allow_empty || settings.allow_empty() {
            NeedTargets::AllowNone
        } else {
            NeedTargets::Need
        },
        parallel: settings.parallel(),
    };

    let universes = &project.manifest.universes;
    let env = TargetEnv {
        cwd: ctx.cwd(),
        mode: project.mode,
        universe: universes,
        index: &project.manifest.index,
        dirs: &RealDirs,
    };

    let plan = plan_targets(&opts, &env, universes.dependencies(), &AddedDepsPromoter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan, universes));
    }

    if let Some(warning) = unlisted_warning(&plan) {
        diagnostic::emit(&warning, ctx.color());
    }

    let source = match &project.path {
        Some(path) => pathdiff::diff_paths(path, ctx.cwd())
            .unwrap_or_else(|| path.clone())
            .display()
            .to_string(),
        None => "the empty global project".to_string(),
    };
    eprintln!(
        "    Resolved {} target(s) from {}",
        plan.resolved.targets.len(),
        source
    );

    Ok(())
}

/// Render a plan as one line per target, then the added dependencies.
fn render_plan<U: PackageUniverse + ?Sized>(plan: &TargetPlan, universe: &U) -> String {
    let mut out = String::new();

    for (name, target) in &plan.resolved.targets {
        let root = universe
            .project(*name)
            .map(|pkg| format!(" [{}]", pkg.root().display()))
            .unwrap_or_default();
        out.push_str(&format!("{}: {}{}\n", name, target, root));
    }

    if !plan.resolved.added_deps.is_empty() {
        out.push_str("added dependencies:\n");
        for location in plan.resolved.added_deps.values() {
            out.push_str(&format!("  {}\n", location));
        }
    }

    out
}

/// Warn about packages no source knows, which build planning reports later.
fn unlisted_warning(plan: &TargetPlan) -> Option<Diagnostic> {
    if plan.resolved.unlisted.is_empty() {
        return None;
    }
    let names: Vec<_> = plan.resolved.unlisted.iter().map(|n| n.as_str()).collect();
    Some(
        Diagnostic::warning(format!("not found in any source: {}", names.join(", ")))
            .with_suggestion("Add the package to `[extra-deps]` or to the `[index]` section"),
    )
}
