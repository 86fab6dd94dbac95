//! The project file (`quay.toml`).
//!
//! A project file describes the four package universes and the package
//! index targets are resolved against:
//!
//! ```toml
//! [project.foo]
//! path = "foo"
//! components = ["lib", "exe:foo", "test:spec"]
//!
//! [extra-deps.forked]
//! path = "../forked"
//!
//! [snapshot.text]
//! version = "2.0.2"
//! revision = 1
//!
//! [global]
//! base = "4.18.0"
//!
//! [index.lens]
//! versions = ["5.2.2", "5.2.3"]
//! deprecated = ["5.2.3"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::core::{
    FileInfo, ImmutableLocation, NamedComponent, PackageIdentifier, PackageLocation, PackageName,
    ProjectPackage, Universes, Version,
};
use crate::resolver::{IndexEntry, StaticIndex};
use crate::util::config::ConfigError;

/// Project file name.
pub const MANIFEST_NAME: &str = "quay.toml";

/// The parsed project file.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub universes: Universes,
    pub index: StaticIndex,
    /// The directory containing this file
    pub manifest_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawManifest {
    project: BTreeMap<String, RawProjectPackage>,
    extra_deps: BTreeMap<String, RawLocation>,
    snapshot: BTreeMap<String, RawLocation>,
    global: BTreeMap<String, RawGlobal>,
    index: BTreeMap<String, RawIndexEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProjectPackage {
    path: PathBuf,
    components: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLocation {
    path: Option<PathBuf>,
    version: Option<String>,
    revision: Option<u32>,
    sha256: Option<String>,
    size: Option<u64>,
    url: Option<String>,
    git: Option<String>,
    commit: Option<String>,
}

/// Global package: `base = "4.18.0"` or `base = { version = "4.18.0" }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGlobal {
    Simple(String),
    Detailed { version: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawIndexEntry {
    versions: Vec<String>,
    deprecated: Vec<String>,
}

impl Manifest {
    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse project file content; relative paths are taken from `path`'s directory.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawManifest = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let mut universes = Universes::new();

        for (name, pkg) in raw.project {
            let name = package_name("project", &name)?;
            let components = pkg
                .components
                .unwrap_or_else(|| vec!["lib".to_string()])
                .iter()
                .map(|c| {
                    c.parse::<NamedComponent>()
                        .map_err(|reason| ConfigError::InvalidComponent {
                            package: name.to_string(),
                            component: c.clone(),
                            reason,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let root = absolute(&manifest_dir, &pkg.path);
            universes.add_project(ProjectPackage::new(name, root, components));
        }

        for (name, raw_loc) in raw.extra_deps {
            let name = package_name("extra-deps", &name)?;
            let location = convert_location("extra-deps", name, raw_loc, &manifest_dir)?;
            universes.local_deps.insert(name, location);
        }

        for (name, raw_loc) in raw.snapshot {
            let name = package_name("snapshot", &name)?;
            let location = convert_location("snapshot", name, raw_loc, &manifest_dir)?;
            if let PackageLocation::Mutable(_) = location {
                return Err(ConfigError::InvalidLocation {
                    section: "snapshot",
                    package: name.to_string(),
                    reason: "snapshot packages cannot be local directories".to_string(),
                });
            }
            universes.snapshot.insert(name, location);
        }

        for (name, global) in raw.global {
            let name = package_name("global", &name)?;
            let version = match global {
                RawGlobal::Simple(v) | RawGlobal::Detailed { version: v } => v,
            };
            universes.global.insert(name, version_of(name, &version)?);
        }

        let index = raw
            .index
            .into_iter()
            .map(|(name, entry)| {
                let name = package_name("index", &name)?;
                let parse_all = |versions: &[String]| {
                    versions
                        .iter()
                        .map(|v| version_of(name, v))
                        .collect::<Result<BTreeSet<Version>, ConfigError>>()
                };
                let entry = IndexEntry {
                    versions: parse_all(&entry.versions)?,
                    deprecated: parse_all(&entry.deprecated)?,
                };
                Ok::<_, ConfigError>((name, entry))
            })
            .collect::<Result<StaticIndex, ConfigError>>()?;

        tracing::debug!(
            "loaded {}: {} project package(s), {} extra dep(s), {} snapshot package(s)",
            path.display(),
            universes.project.len(),
            universes.local_deps.len(),
            universes.snapshot.len()
        );

        Ok(Manifest {
            universes,
            index,
            manifest_dir,
        })
    }
}

fn package_name(section: &'static str, name: &str) -> Result<PackageName, ConfigError> {
    PackageName::new(name).map_err(|source| ConfigError::InvalidName { section, source })
}

fn version_of(name: PackageName, version: &str) -> Result<Version, ConfigError> {
    Version::parse(version).map_err(|source| ConfigError::InvalidVersion {
        package: name.to_string(),
        source,
    })
}

/// Join `path` onto `base`, resolving symlinks when the directory exists.
fn absolute(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    std::fs::canonicalize(&joined).unwrap_or(joined)
}

fn convert_location(
    section: &'static str,
    name: PackageName,
    raw: RawLocation,
    manifest_dir: &Path,
) -> Result<PackageLocation, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidLocation {
        section,
        package: name.to_string(),
        reason: reason.to_string(),
    };
    let parse_url = |s: &str| Url::parse(s).map_err(|e| invalid(&format!("bad url `{}`: {}", s, e)));

    let kinds = [
        raw.path.is_some(),
        raw.version.is_some(),
        raw.url.is_some(),
        raw.git.is_some(),
    ];
    if kinds.iter().filter(|k| **k).count() != 1 {
        return Err(invalid("expected exactly one of `path`, `version`, `url` or `git`"));
    }

    if raw.version.is_none() && (raw.revision.is_some() || raw.sha256.is_some()) {
        return Err(invalid("`revision` and `sha256` only apply to `version`"));
    }

    if raw.size.is_some() && raw.sha256.is_none() {
        return Err(invalid("`size` only applies to `sha256`"));
    }

    if let Some(path) = raw.path {
        return Ok(PackageLocation::Mutable(absolute(manifest_dir, &path)));
    }

    let location = if let Some(version) = raw.version {
        let file_info = match (raw.revision, raw.sha256) {
            (None, None) => FileInfo::Latest,
            (Some(rev), None) => FileInfo::Revision(rev),
            (None, Some(sha256)) => {
                let qualifier = match raw.size {
                    Some(size) => format!("sha256:{},{}", sha256, size),
                    None => format!("sha256:{}", sha256),
                };
                FileInfo::parse(&qualifier).ok_or_else(|| invalid("malformed sha256"))?
            }
            (Some(_), Some(_)) => return Err(invalid("give either `revision` or `sha256`")),
        };
        ImmutableLocation::Index {
            ident: PackageIdentifier::new(name, version_of(name, &version)?),
            file_info,
        }
    } else if let Some(url) = raw.url {
        ImmutableLocation::Archive {
            url: parse_url(&url)?,
        }
    } else if let Some(git) = raw.git {
        let commit = raw.commit.ok_or_else(|| invalid("`git` needs a `commit`"))?;
        ImmutableLocation::Repo {
            url: parse_url(&git)?,
            commit,
        }
    } else {
        return Err(invalid("no location given"));
    };

    Ok(PackageLocation::Immutable(location))
}
