//! Core data structures for Quay.
//!
//! This module contains the vocabulary shared by every resolution stage:
//! - Interned package names, versions and identifiers
//! - Components and package locations
//! - Raw targets and final targets
//! - The package universes targets are resolved against
//! - The project file that describes them

pub mod component;
pub mod location;
pub mod manifest;
pub mod package;
pub mod package_id;
pub mod package_name;
pub mod target;
pub mod universe;
pub mod version;

pub use component::NamedComponent;
pub use location::{FileInfo, ImmutableLocation, PackageLocation};
pub use manifest::{Manifest, MANIFEST_NAME};
pub use package::ProjectPackage;
pub use package_id::PackageIdentifier;
pub use package_name::{PackageName, PackageNameError};
pub use target::{ComponentSpec, PackageType, RawInput, RawTarget, Target};
pub use universe::{DepOrigin, DepPackage, PackageUniverse, SourceMap, Universes};
pub use version::{Version, VersionError};
