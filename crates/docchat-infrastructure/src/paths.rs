//! Unified path management for docchat files.
//!
//! All persisted client state lives under one directory so that a custom
//! base (tests, `--data-dir`) relocates everything at once.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "docchat";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for docchat_core::DocchatError {
    fn from(err: PathError) -> Self {
        docchat_core::DocchatError::config(err.to_string())
    }
}

/// Resolves where docchat keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/docchat/           # Base directory (or a custom base)
/// ├── config.toml              # Client configuration
/// ├── session.json             # Active session slot
/// ├── notebooks.json           # Notebook list with transcripts
/// └── logs/                    # Daily-rolling log files
///     └── docchat.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone)]
pub struct DocchatPaths {
    custom_base: Option<PathBuf>,
}

impl DocchatPaths {
    /// Creates a resolver; `None` uses the platform config directory.
    pub fn new(custom_base: Option<PathBuf>) -> Self {
        Self { custom_base }
    }

    /// Returns the base directory.
    ///
    /// - Linux: `~/.config/docchat`
    /// - macOS: `~/Library/Application Support/docchat`
    /// - Windows: `%APPDATA%\docchat`
    pub fn base_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.custom_base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.base_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.base_dir()?.join("session.json"))
    }

    pub fn notebooks_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.base_dir()?.join("notebooks.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.base_dir()?.join("logs"))
    }
}
