//! Quay - build target resolution for a Haskell-style package build tool
//!
//! This crate turns the target strings given on a build command line into a
//! validated, conflict-free set of build targets, together with any
//! dependency locations those targets require.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for Quay unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for the directory
/// resolver and the package index, plus universe fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::Manifest, package_name::PackageName, target::Target, universe::PackageUniverse,
    universe::Universes,
};

pub use ops::{parse_targets, plan_targets, TargetOptions, TargetPlan};
pub use resolver::{TargetError, TargetErrors};
pub use util::context::GlobalContext;
