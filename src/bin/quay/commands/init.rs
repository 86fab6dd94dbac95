//! `quay init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use quay::ops::{init_project, InitOptions};
use quay::util::GlobalContext;

pub fn execute(args: InitArgs, ctx: &GlobalContext) -> Result<()> {
    let path = args
        .path
        .map(|p| ctx.cwd().join(p))
        .unwrap_or_else(|| PathBuf::from(ctx.cwd()));

    let opts = InitOptions {
        name: args.name,
        components: args.components,
    };

    let manifest_path = init_project(&path, &opts)?;
    eprintln!("     Initialized project in {}", manifest_path.display());

    Ok(())
}
