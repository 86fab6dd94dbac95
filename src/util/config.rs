//! Configuration file support for Quay.
//!
//! Quay supports two settings file locations:
//! - Global: `<home>/config.toml` - User-wide defaults
//! - Project: `.quay/config.toml` - Project-specific overrides
//!
//! Project settings take precedence over global settings. The project file
//! itself (`quay.toml`) is loaded by [`crate::core::manifest`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{PackageNameError, VersionError};

/// Errors from loading settings or the project file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid package name in [{section}]")]
    InvalidName {
        section: &'static str,
        #[source]
        source: PackageNameError,
    },

    #[error("invalid version for `{package}`")]
    InvalidVersion {
        package: String,
        #[source]
        source: VersionError,
    },

    #[error("invalid component `{component}` in project package `{package}`: {reason}")]
    InvalidComponent {
        package: String,
        component: String,
        reason: String,
    },

    #[error("invalid location for `{package}` in [{section}]: {reason}")]
    InvalidLocation {
        section: &'static str,
        package: String,
        reason: String,
    },
}

/// Quay settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target resolution settings
    pub targets: TargetsConfig,
}

/// Target resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TargetsConfig {
    /// Succeed when no targets are selected
    pub allow_empty: Option<bool>,

    /// Resolve targets in parallel (default: true)
    pub parallel: Option<bool>,
}

impl Config {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.targets.allow_empty.is_some() {
            self.targets.allow_empty = other.targets.allow_empty;
        }
        if other.targets.parallel.is_some() {
            self.targets.parallel = other.targets.parallel;
        }
    }

    pub fn allow_empty(&self) -> bool {
        self.targets.allow_empty.unwrap_or(false)
    }

    pub fn parallel(&self) -> bool {
        self.targets.parallel.unwrap_or(true)
    }
}

/// Load merged settings from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.quay/config.toml)
/// 2. Global config (<home>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();
    config.merge(Config::load_or_default(global_path));
    config.merge(Config::load_or_default(project_path));
    config
}
