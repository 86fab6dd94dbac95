//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Quay - build target resolution for Haskell-style packages
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve build targets and print the resulting plan
    Targets(TargetsArgs),

    /// Create a quay.toml in an existing directory
    Init(InitArgs),
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Targets to resolve (defaults to every project package)
    ///
    /// Forms: NAME, NAME-VERSION[@rev:N], NAME:lib, NAME:COMPONENT,
    /// NAME:exe|test|bench:COMPONENT, :COMPONENT, or a directory.
    pub targets: Vec<String>,

    /// Succeed even when no targets are selected
    #[arg(long)]
    pub allow_empty: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Project file to use instead of searching for quay.toml
    #[arg(long, env = "QUAY_PROJECT")]
    pub project: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Components of the package, e.g. `lib`, `exe:app`, `test:spec`
    #[arg(long = "component", value_name = "COMPONENT")]
    pub components: Vec<String>,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}
