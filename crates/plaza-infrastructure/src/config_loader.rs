//! Client configuration loading.

use std::fs;
use std::path::Path;

use plaza_core::Result;
use plaza_core::config::ClientConfig;

use crate::paths::PlazaPaths;

/// Loads the client configuration from the default path
/// (`~/.config/plaza/config.toml`).
///
/// A missing or empty file yields the defaults; this function is purely
/// responsible for reading the TOML file and contains no fallback logic
/// beyond that.
pub fn load_config() -> Result<ClientConfig> {
    match PlazaPaths::config_file() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(ClientConfig::default()),
    }
}

/// Loads the client configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ClientConfig::default());
    }

    let config: ClientConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::config::DEFAULT_API_BASE;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_reads_api_base() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base = \"https://plaza.example.com\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.api_base, "https://plaza.example.com");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base = [not toml").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
