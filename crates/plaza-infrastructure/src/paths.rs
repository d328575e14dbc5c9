//! Unified path management for plaza configuration files.
//!
//! All plaza configuration and credential data lives under the platform
//! config directory so every surface (CLI, future shells) reads the same
//! files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/plaza/             # Config directory
//! ├── config.toml              # Client configuration (API base URL)
//! └── credentials.toml         # Access/refresh token pair
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined for this platform.
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

/// Unified path management for plaza.
pub struct PlazaPaths;

impl PlazaPaths {
    /// Returns the plaza configuration directory.
    ///
    /// Uses the platform convention (XDG on Linux, Application Support on
    /// macOS, AppData on Windows). The directory is not created here.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("plaza"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path of the credential file.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_one_directory() {
        // dirs::config_dir is None only on unsupported platforms
        let dir = PlazaPaths::config_dir().unwrap();
        assert!(PlazaPaths::config_file().unwrap().starts_with(&dir));
        assert!(PlazaPaths::credentials_file().unwrap().starts_with(&dir));
    }
}
