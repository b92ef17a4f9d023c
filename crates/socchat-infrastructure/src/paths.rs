//! Path management for socchat configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/socchat/           # Config directory (platform config dir)
//! └── config.toml              # Pipeline configuration
//! ```

use std::fmt;
use std::path::PathBuf;

const APP_DIR: &str = "socchat";
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves socchat paths under the platform config directory
/// (XDG on Linux, `Library/Application Support` on macOS, `AppData` on Windows).
pub struct SocchatPaths;

impl SocchatPaths {
    /// Returns the socchat configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
