use serde::{Deserialize, Serialize};

/// Base URL used when no configuration file or flag overrides it. A local
/// development server listens on this port.
pub const DEFAULT_API_BASE: &str = "http://localhost:8445";

/// Client configuration, stored as `config.toml` under the config directory.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the platform API, without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl ClientConfig {
    /// Returns `api_base` with any trailing slash removed, so endpoint paths
    /// can always be appended with a leading slash.
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_base() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            api_base: "https://plaza.example.com/".to_string(),
        };
        assert_eq!(config.api_base_trimmed(), "https://plaza.example.com");
    }
}
