//! Platform-specific configuration paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default config file location.
///
/// - Linux: `~/.config/autovot/config.toml`
/// - macOS: `~/Library/Application Support/autovot/config.toml`
/// - Windows: `%APPDATA%\autovot\config.toml`
pub fn config_file_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(Error::ConfigDirNotFound)
}

/// Config file in effect: the override if one was given, else the default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |path| Ok(path.to_path_buf()))
}
