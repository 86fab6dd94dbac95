//! `quay init` - create a project file in an existing directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::{NamedComponent, PackageName, MANIFEST_NAME};

/// Options for initializing a project.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Package name (defaults to the directory name)
    pub name: Option<String>,

    /// Components of the package (defaults to `lib`)
    pub components: Vec<String>,
}

/// Write a `quay.toml` declaring the directory as a single project package.
///
/// Returns the path of the new project file.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<PathBuf> {
    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    let dir_name = fs::canonicalize(path)
        .with_context(|| format!("failed to access directory: {}", path.display()))?
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);

    let Some(raw_name) = opts.name.clone().or(dir_name) else {
        bail!("cannot derive a package name from `{}`; pass --name", path.display());
    };
    let name = PackageName::new(&raw_name)
        .with_context(|| format!("`{}` cannot be used as a package name; pass --name", raw_name))?;

    let components = if opts.components.is_empty() {
        vec![NamedComponent::Library]
    } else {
        opts.components
            .iter()
            .map(|c| c.parse::<NamedComponent>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?
    };

    let mut package = toml::Table::new();
    package.insert("path".into(), toml::Value::String(".".into()));
    package.insert(
        "components".into(),
        toml::Value::Array(
            components
                .iter()
                .map(|c| toml::Value::String(c.to_string()))
                .collect(),
        ),
    );
    let mut project = toml::Table::new();
    project.insert(name.to_string(), toml::Value::Table(package));
    let mut root = toml::Table::new();
    root.insert("project".into(), toml::Value::Table(project));

    let content = toml::to_string(&root).context("failed to serialize project file")?;

    fs::write(&manifest_path, content)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    tracing::debug!("wrote {}", manifest_path.display());
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Manifest, PackageUniverse};
    use tempfile::TempDir;

    #[test]
    fn test_init_uses_directory_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("my-lib");
        fs::create_dir(&dir).unwrap();

        let path = init_project(&dir, &InitOptions::default()).unwrap();
        let manifest = Manifest::load(&path).unwrap();
        let pkg = manifest
            .universes
            .project(PackageName::new("my-lib").unwrap())
            .unwrap();
        assert!(pkg.components().contains(&NamedComponent::Library));
    }

    #[test]
    fn test_init_with_components() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            name: Some("app".to_string()),
            components: vec!["exe:app".to_string(), "test:spec".to_string()],
        };

        let path = init_project(tmp.path(), &opts).unwrap();
        let manifest = Manifest::load(&path).unwrap();
        let pkg = manifest
            .universes
            .project(PackageName::new("app").unwrap())
            .unwrap();
        assert_eq!(pkg.components().len(), 2);
    }

    #[test]
    fn test_init_escapes_component_names() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            name: Some("app".to_string()),
            components: vec!["exe:a\"b".to_string()],
        };

        let path = init_project(tmp.path(), &opts).unwrap();
        let manifest = Manifest::load(&path).unwrap();
        let pkg = manifest
            .universes
            .project(PackageName::new("app").unwrap())
            .unwrap();
        assert!(pkg
            .components()
            .contains(&NamedComponent::Executable("a\"b".to_string())));
    }

    #[test]
    fn test_init_refuses_existing_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_NAME), "").unwrap();

        let err = init_project(tmp.path(), &InitOptions::default()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_init_rejects_invalid_name() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            name: Some("my_lib".to_string()),
            ..Default::default()
        };
        assert!(init_project(tmp.path(), &opts).is_err());
        assert!(!tmp.path().join(MANIFEST_NAME).exists());
    }

    #[test]
    fn test_init_rejects_invalid_component() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            name: Some("app".to_string()),
            components: vec!["binary:app".to_string()],
        };
        assert!(init_project(tmp.path(), &opts).is_err());
    }
}
