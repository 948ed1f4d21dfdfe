//! Unified path management for daylog data files.

use daylog_core::error::{DaylogError, Result};
use std::path::PathBuf;

/// Platform path resolution for daylog.
///
/// # Directory Structure
///
/// ```text
/// ~/.local/share/daylog/       # Data directory (XDG on Linux)
/// └── activities.toml          # Persisted activity store
/// ```
pub struct DaylogPaths;

impl DaylogPaths {
    /// Returns the daylog data directory (e.g. `~/.local/share/daylog/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("daylog"))
            .ok_or_else(|| DaylogError::io("cannot determine the platform data directory"))
    }

    /// Returns the daylog config directory (e.g. `~/.config/daylog/`).
    ///
    /// Nothing is stored here yet; settings files land here when they exist.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("daylog"))
            .ok_or_else(|| DaylogError::io("cannot determine the platform config directory"))
    }

    /// Returns the path to the persisted activity store.
    pub fn activities_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("activities.toml"))
    }
}
