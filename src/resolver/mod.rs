//! Target resolution.
//!
//! Turns command-line target strings into a conflict-checked set of build
//! targets:
//!
//! 1. [`parse`] reads each token's structure
//! 2. [`directory`] expands tokens that name directories
//! 3. [`resolve`] decides what each target means against the universes
//! 4. [`combine`] merges the results into one target per package

pub mod combine;
pub mod directory;
pub mod errors;
pub mod index;
pub mod parse;
pub mod resolve;

pub use combine::{combine_resolve_results, Combined};
pub use directory::{parse_raw_target_dirs, DirResolver, RealDirs};
pub use errors::{NoTargetsReason, TargetError, TargetErrors};
pub use index::{IndexEntry, PackageIndex, StaticIndex};
pub use parse::{normalize_inputs, parse_raw_target};
pub use resolve::{Provenance, ResolveResult, TargetResolver};
