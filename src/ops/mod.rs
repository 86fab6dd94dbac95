//! High-level operations.
//!
//! This module contains the implementation of Quay commands.

pub mod init;
pub mod promote;
pub mod targets;

pub use init::{init_project, InitOptions};
pub use promote::{AddedDepsPromoter, SnapshotPromoter};
pub use targets::{
    parse_targets, plan_targets, NeedTargets, ProjectMode, ResolvedTargets, TargetEnv,
    TargetOptions, TargetPlan,
};
