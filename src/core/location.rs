//! Package locations - WHERE a package's source comes from.
//!
//! A location is either a mutable local directory or an immutable
//! coordinate. Only index coordinates can be overridden from the command
//! line; archives and repositories are pinned in configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use url::Url;

use crate::core::{PackageIdentifier, Version};

/// Which revision of an index entry's package description to use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileInfo {
    /// Whatever the index currently considers newest
    #[default]
    Latest,
    /// A specific revision number
    Revision(u32),
    /// A content hash, with the file size when known
    Hash { sha256: String, size: Option<u64> },
}

impl FileInfo {
    /// Parse the qualifier that follows `@` in `name-version@...`.
    ///
    /// Accepted forms: `rev:N`, `sha256:HEX`, `sha256:HEX,SIZE`.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(rev) = s.strip_prefix("rev:") {
            return rev.parse().ok().map(FileInfo::Revision);
        }

        let rest = s.strip_prefix("sha256:")?;
        let (hash, size) = match rest.split_once(',') {
            Some((hash, size)) => (hash, Some(size.parse().ok()?)),
            None => (rest, None),
        };

        if hash.len() != 64 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        Some(FileInfo::Hash {
            sha256: hash.to_ascii_lowercase(),
            size,
        })
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, FileInfo::Latest)
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileInfo::Latest => Ok(()),
            FileInfo::Revision(rev) => write!(f, "@rev:{}", rev),
            FileInfo::Hash { sha256, size: None } => write!(f, "@sha256:{}", sha256),
            FileInfo::Hash {
                sha256,
                size: Some(size),
            } => write!(f, "@sha256:{},{}", sha256, size),
        }
    }
}

/// An immutable package source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImmutableLocation {
    /// An exact version from the package index
    Index {
        ident: PackageIdentifier,
        file_info: FileInfo,
    },
    /// A source archive downloaded from a URL
    Archive { url: Url },
    /// A commit in a version-control repository
    Repo { url: Url, commit: String },
}

impl ImmutableLocation {
    /// An index location at `version` with the `Latest` qualifier.
    pub fn index_latest(ident: PackageIdentifier) -> Self {
        ImmutableLocation::Index {
            ident,
            file_info: FileInfo::Latest,
        }
    }

    /// The index coordinate, if this location comes from the index.
    pub fn as_index(&self) -> Option<(&PackageIdentifier, &FileInfo)> {
        match self {
            ImmutableLocation::Index { ident, file_info } => Some((ident, file_info)),
            _ => None,
        }
    }

    pub fn is_index(&self) -> bool {
        self.as_index().is_some()
    }

    /// The pinned version, for index locations.
    pub fn version(&self) -> Option<&Version> {
        self.as_index().map(|(ident, _)| &ident.version)
    }
}

impl fmt::Display for ImmutableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImmutableLocation::Index { ident, file_info } => write!(f, "{}{}", ident, file_info),
            ImmutableLocation::Archive { url } => write!(f, "archive {}", url),
            ImmutableLocation::Repo { url, commit } => {
                write!(f, "{} @ {}", url, commit.get(..12).unwrap_or(commit))
            }
        }
    }
}

/// Where a package's source lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "location", rename_all = "lowercase")]
pub enum PackageLocation {
    /// A local directory that may change between builds
    Mutable(PathBuf),
    Immutable(ImmutableLocation),
}

impl PackageLocation {
    pub fn as_immutable(&self) -> Option<&ImmutableLocation> {
        match self {
            PackageLocation::Immutable(loc) => Some(loc),
            PackageLocation::Mutable(_) => None,
        }
    }
}

impl fmt::Display for PackageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageLocation::Mutable(dir) => write!(f, "{}", dir.display()),
            PackageLocation::Immutable(loc) => write!(f, "{}", loc),
        }
    }
}
