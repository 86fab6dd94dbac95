//! Global context for Quay operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::core::{Manifest, MANIFEST_NAME};
use crate::ops::ProjectMode;
use crate::util::config::{load_config, Config};

/// Environment variable overriding the Quay home directory.
pub const HOME_ENV: &str = "QUAY_HOME";

/// Project directories for Quay
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "quay", "quay"));

/// A loaded project, explicit or implicit.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub manifest: Manifest,
    pub mode: ProjectMode,
    /// The project file, when one exists on disk
    pub path: Option<PathBuf>,
}

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for user-wide Quay data
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_paths(cwd, default_home()))
    }

    /// Create a GlobalContext with explicit working and home directories.
    pub fn with_paths(cwd: PathBuf, home: PathBuf) -> Self {
        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Quay home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global settings file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project settings file path for a project directory.
    pub fn project_config_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(".quay").join("config.toml")
    }

    /// The project file used when no project is found.
    pub fn global_project_path(&self) -> PathBuf {
        self.home.join("global-project").join(MANIFEST_NAME)
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `quay.toml` starting from cwd and searching upward.
    pub fn find_project(&self) -> Option<PathBuf> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join(MANIFEST_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the project to resolve targets against.
    ///
    /// An explicit path wins, then the nearest `quay.toml` above cwd. Without
    /// either, the global project is used, or an empty one if it does not
    /// exist.
    pub fn load_project(&self, explicit: Option<&Path>) -> Result<LoadedProject> {
        let found = match explicit {
            Some(path) => Some((self.cwd.join(path), ProjectMode::Explicit)),
            None => self
                .find_project()
                .map(|path| (path, ProjectMode::Explicit))
                .or_else(|| {
                    let global = self.global_project_path();
                    global
                        .is_file()
                        .then_some((global, ProjectMode::ImplicitGlobal))
                }),
        };

        let Some((path, mode)) = found else {
            tracing::debug!("no project file found, using an empty global project");
            let manifest = Manifest {
                manifest_dir: self.home.join("global-project"),
                ..Manifest::default()
            };
            return Ok(LoadedProject {
                manifest,
                mode: ProjectMode::ImplicitGlobal,
                path: None,
            });
        };

        tracing::debug!("using project file {}", path.display());
        let manifest = Manifest::load(&path)
            .with_context(|| format!("failed to load project file: {}", path.display()))?;

        Ok(LoadedProject {
            manifest,
            mode,
            path: Some(path),
        })
    }

    /// Settings for a project, merged over the global settings.
    pub fn settings(&self, project: &LoadedProject) -> Config {
        load_config(
            &self.config_path(),
            &self.project_config_path(&project.manifest.manifest_dir),
        )
    }
}

fn default_home() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }

    if let Some(dirs) = PROJECT_DIRS.as_ref() {
        return dirs.data_dir().to_path_buf();
    }

    BaseDirs::new()
        .map(|b| b.home_dir().join(".quay"))
        .unwrap_or_else(|| PathBuf::from(".quay"))
}
