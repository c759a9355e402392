//! Project discovery and layout
//!
//! A project is any directory containing a `.mdk/` marker directory. Record
//! files live in one directory per entity type below the project root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::identity::EntityId;
use crate::entities::EntityKind;

/// Marker directory that identifies a project root
pub const MARKER_DIR: &str = ".mdk";

/// Directory holding the company profile and its logo
pub const PROFILE_DIR: &str = "profile";

/// Extension shared by all record files
pub const RECORD_EXTENSION: &str = ".mdk.yaml";

const DEFAULT_PROJECT_CONFIG: &str = "\
# mdk project configuration
#
# author: Jane Doe      # recorded on new records (overrides the user config)
# format: yaml          # default output format for show/new (yaml | json)
";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an mdk project (or any parent directory): {0}\nRun 'mdk init' to create one")]
    NotFound(PathBuf),

    #[error("mdk project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A discovered project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Find the project containing the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Find the project containing `start`, walking up through its parents
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        start
            .ancestors()
            .find(|dir| dir.join(MARKER_DIR).is_dir())
            .map(|root| Self {
                root: root.to_path_buf(),
            })
            .ok_or_else(|| ProjectError::NotFound(start.to_path_buf()))
    }

    /// Create the project structure at `root`
    ///
    /// Fails if a project already exists there unless `force` is set, in
    /// which case missing directories are created and the config is rewritten.
    pub fn init(root: &Path, force: bool) -> Result<Self, ProjectError> {
        let marker = root.join(MARKER_DIR);
        if marker.exists() && !force {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }

        fs::create_dir_all(&marker)?;
        fs::write(marker.join("config.yaml"), DEFAULT_PROJECT_CONFIG)?;

        for kind in EntityKind::all() {
            fs::create_dir_all(root.join(kind.dir()))?;
        }
        fs::create_dir_all(root.join(PROFILE_DIR))?;

        tracing::info!(root = %root.display(), "initialized project");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project-level config file
    pub fn config_path(&self) -> PathBuf {
        self.root.join(MARKER_DIR).join("config.yaml")
    }

    /// Directory holding records of one entity type
    pub fn entity_dir(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.dir())
    }

    /// Path of the file for a record ID
    pub fn record_path(&self, kind: EntityKind, id: &EntityId) -> PathBuf {
        self.entity_dir(kind)
            .join(format!("{}{}", id, RECORD_EXTENSION))
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.root.join(PROFILE_DIR)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.profile_dir().join(format!("company{}", RECORD_EXTENSION))
    }
}
