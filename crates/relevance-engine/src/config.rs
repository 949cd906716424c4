//! Configuration types for the relevance engine.
//!
//! The only setting the client needs is the base URL of the classification
//! service. It is resolved once at startup and handed to the
//! [`ApiClient`](crate::client::ApiClient) by value.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured API base.
pub const API_BASE_ENV: &str = "RELEVANCE_API_BASE";

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = ".relevance/config.json";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the classification service.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    "https://yyccbb-review-agent-server.hf.space".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence, highest first: `flag`, `env`, the file at `path` (if it
    /// exists), then the built-in default. The resulting base URL is
    /// normalized with [`normalize_base`].
    pub fn resolve(
        flag: Option<&str>,
        env: Option<&str>,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };

        if let Some(base) = flag.or(env) {
            config.api_base = base.to_string();
        }

        config.api_base = normalize_base(&config.api_base)?;
        Ok(config)
    }
}

/// Trim whitespace and trailing slashes from a base URL.
pub fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ConfigError::MissingApiBase);
    }
    Ok(base.to_string())
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No usable API base URL.
    #[error("API base URL is not set (use --api-base or {API_BASE_ENV})")]
    MissingApiBase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.api_base,
            "https://yyccbb-review-agent-server.hf.space"
        );
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(
            normalize_base(" http://localhost:8000/ ").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base("http://localhost:8000//").unwrap(),
            "http://localhost:8000"
        );
        assert!(matches!(
            normalize_base("  / "),
            Err(ConfigError::MissingApiBase)
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_base: "http://example.test".into(),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_resolve_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        Config {
            api_base: "http://from-file/".into(),
        }
        .save(&path)
        .unwrap();

        let from_file = Config::resolve(None, None, &path).unwrap();
        assert_eq!(from_file.api_base, "http://from-file");

        let from_env = Config::resolve(None, Some("http://from-env"), &path).unwrap();
        assert_eq!(from_env.api_base, "http://from-env");

        let from_flag =
            Config::resolve(Some("http://from-flag/"), Some("http://from-env"), &path).unwrap();
        assert_eq!(from_flag.api_base, "http://from-flag");
    }

    #[test]
    fn test_resolve_without_file_uses_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(None, None, &dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_rejects_blank_base() {
        let dir = TempDir::new().unwrap();
        let result = Config::resolve(Some("   "), None, &dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::MissingApiBase)));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
