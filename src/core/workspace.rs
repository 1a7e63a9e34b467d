//! Workspace discovery and structure
//!
//! A workspace is any directory containing `.phonedir/`, which holds the
//! project config and the directory database.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the workspace marker directory
pub const WORKSPACE_DIR: &str = ".phonedir";

/// Database file name within the marker directory
pub const DATABASE_FILE: &str = "directory.db";

/// Represents a phone directory workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .phonedir/)
    root: PathBuf,
}

impl Workspace {
    /// Find workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current = std::env::current_dir()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            if current.join(WORKSPACE_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if root.join(WORKSPACE_DIR).exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        Self::write_structure(root)
    }

    /// Initialize even if .phonedir/ exists; the database is kept
    pub fn init_force(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        Self::write_structure(root)
    }

    fn write_structure(root: PathBuf) -> Result<Self, WorkspaceError> {
        let dir = root.join(WORKSPACE_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Phone directory workspace configuration

# Database file (default: .phonedir/directory.db)
# database: ""

# Default output format (auto, tsv, json, yaml, csv, md, id)
# default_format: auto

# Log level when PHONEDIR_LOG is unset (error, warn, info, debug, trace)
# log_level: warn
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .phonedir directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Default database location for this workspace
    pub fn database_path(&self) -> PathBuf {
        self.config_dir().join(DATABASE_FILE)
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a phone directory workspace (searched from {searched_from:?}). Run 'phonedir init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("phone directory workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
