use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{LilError, Result};
use crate::menu::TooltipFallback;

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub cache_file: Option<PathBuf>,
    #[serde(default)]
    pub tooltip_fallback: TooltipFallback,
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| LilError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| LilError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lil").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get API key with env var taking precedence over config file
    pub fn api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(LilError::MissingApiKey)
    }

    pub fn cache_path(&self) -> PathBuf {
        if let Some(path) = &self.cache_file {
            return path.clone();
        }
        ProjectDirs::from("", "", "lil")
            .map(|dirs| dirs.cache_dir().join("issues.json"))
            .unwrap_or_else(|| std::env::temp_dir().join("lil_issues_cache.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_takes_precedence() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        temp_env::with_var(API_KEY_ENV, Some("from-env"), || {
            assert_eq!(config.api_key().unwrap(), "from-env");
        });
    }

    #[test]
    fn test_empty_env_key_falls_back_to_file() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        temp_env::with_var(API_KEY_ENV, Some(""), || {
            assert_eq!(config.api_key().unwrap(), "from-file");
        });
    }

    #[test]
    fn test_missing_key() {
        temp_env::with_var_unset(API_KEY_ENV, || {
            let err = Config::default().api_key().unwrap_err();
            assert!(matches!(err, LilError::MissingApiKey));
            assert_eq!(err.to_string(), "LINEAR_API_KEY environment variable not set");
        });
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_key = \"lin_api_123\"\ncache_file = \"/tmp/lil.json\"\ntooltip_fallback = \"empty\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("lin_api_123"));
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/lil.json"));
        assert_eq!(config.tooltip_fallback, TooltipFallback::Empty);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.tooltip_fallback, TooltipFallback::Title);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tooltip_fallback = \"sometimes\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(LilError::ConfigParse { .. })
        ));
    }
}
