//! Project management
//!
//! Handles project initialization and provides access to the shape store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::{Config, ShapeStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a polygons project. Run 'polygons init' first.")]
    NotInProject,
}

/// A polygons project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    ///
    /// Existing configuration is left untouched, so this is idempotent.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&project_dir).with_context(|| {
            format!(
                "Failed to create {} directory: {}",
                PROJECT_DIR,
                project_dir.display()
            )
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r##"# polygons configuration

# Directory for Rectangle.json, Square.json and their CSV exports,
# relative to the project root
data_dir = "."

# Character used when rendering shapes
mark = "#"
"##;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.polygons` directory
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shape store for this project
    pub fn store(&self) -> Result<ShapeStore> {
        Ok(ShapeStore::new(self.config.data_dir()?))
    }
}
