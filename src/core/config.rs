//! Configuration - user and project YAML layers
//!
//! Lookup order (later wins):
//! 1. user config: `<config dir>/mdk/config.yaml`
//! 2. project config: `<root>/.mdk/config.yaml`
//! 3. environment: `MDK_AUTHOR`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::project::Project;

/// Environment variable overriding the configured author
pub const AUTHOR_ENV: &str = "MDK_AUTHOR";

/// Output format preferred when none is requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultFormat {
    Yaml,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Name recorded as the author of new records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DefaultFormat>,
}

impl Config {
    /// Load user config, the given project's config (if any) and env overrides
    pub fn load_for(project: Option<&Project>) -> Self {
        let mut config = Self::default();

        if let Some(user) = Self::user_config_path().and_then(|p| Self::read(&p)) {
            config.merge(user);
        }
        if let Some(local) = project.and_then(|p| Self::read(&p.config_path())) {
            config.merge(local);
        }
        if let Ok(author) = std::env::var(AUTHOR_ENV) {
            if !author.trim().is_empty() {
                config.author = Some(author);
            }
        }

        config
    }

    /// Location of the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mdk").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Option<Config>>(&content) {
            // A file holding only comments parses as null
            Ok(parsed) => Some(parsed.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    /// Author for new records: config, then `$USER`, then "unknown"
    pub fn author(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
