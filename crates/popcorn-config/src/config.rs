use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key. The OMDB_API_KEY environment variable takes precedence.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load the config file, or fall back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// API key with the environment override applied. `None` when no key is
    /// configured anywhere.
    pub fn resolved_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if self.omdb.api_key.is_empty() {
            None
        } else {
            Some(self.omdb.api_key.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert!(config.omdb.api_key.is_empty());
        assert_eq!(config.omdb.base_url, "https://www.omdbapi.com/");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.omdb.api_key = "3b0006a4".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.omdb.api_key, "3b0006a4");
        assert_eq!(loaded.omdb.base_url, "https://www.omdbapi.com/");
    }

    #[test]
    fn parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "omdb = not toml").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
