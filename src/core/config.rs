//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::workspace::Workspace;

/// Phone directory configuration with layered hierarchy
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Database file; relative paths resolve against the workspace root
    pub database: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Log level used when PHONEDIR_LOG is unset
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(workspace: Option<&Workspace>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/phonedir/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Workspace config (.phonedir/config.yaml)
        if let Some(workspace) = workspace {
            if let Some(mut local) = Self::read_file(&workspace.config_dir().join("config.yaml")) {
                local.database = local.database.map(|p| workspace.root().join(p));
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Ok(database) = std::env::var("PHONEDIR_DATABASE") {
            if !database.is_empty() {
                config.database = Some(PathBuf::from(database));
            }
        }
        if let Ok(format) = std::env::var("PHONEDIR_FORMAT") {
            if !format.is_empty() {
                config.default_format = Some(format);
            }
        }

        config
    }

    /// Parse a config file, ignoring missing or malformed files
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Option<Config>>(&contents) {
            Ok(parsed) => Some(parsed.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "phonedir")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// Resolve the database file: explicit config first, then the workspace
    pub fn database_path(&self, workspace: Option<&Workspace>) -> Option<PathBuf> {
        self.database
            .clone()
            .or_else(|| workspace.map(|w| w.database_path()))
    }
}
