use crate::error::{GrimoireError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SOURCE_URL: &str = "https://api.open5e.com/spells/?document__slug=wotc-srd&limit=2000";
const DEFAULT_CACHE_NAME: &str = "grimoire-v1";

/// Configuration for grimoire, stored as `config.json` in the data
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrimoireConfig {
    /// First page of the paginated remote spell database.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Current offline-cache generation; changing it retires the old
    /// generation on the next activation.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,

    /// Assets guaranteed to be served from cache once installed.
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_cache_name() -> String {
    DEFAULT_CACHE_NAME.to_string()
}

fn default_manifest() -> Vec<String> {
    vec![DEFAULT_SOURCE_URL.to_string()]
}

impl Default for GrimoireConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            cache_name: default_cache_name(),
            manifest: default_manifest(),
        }
    }
}

impl GrimoireConfig {
    /// Load config from the given directory, or return defaults if not
    /// found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GrimoireError::Io)?;
        let config: GrimoireConfig =
            serde_json::from_str(&content).map_err(GrimoireError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GrimoireError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GrimoireError::Serialization)?;
        fs::write(config_path, content).map_err(GrimoireError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "source-url" => Some(self.source_url.clone()),
            "cache-name" => Some(self.cache_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "source-url" => self.source_url = value.to_string(),
            "cache-name" => self.cache_name = value.to_string(),
            _ => return Err(GrimoireError::Api(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_srd_source() {
        let config = GrimoireConfig::default();
        assert!(config.source_url.contains("api.open5e.com"));
        assert_eq!(config.cache_name, "grimoire-v1");
        assert_eq!(config.manifest, vec![config.source_url.clone()]);
    }

    #[test]
    fn load_missing_config_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GrimoireConfig::load(dir.path().join("nothing-here")).unwrap();
        assert_eq!(config, GrimoireConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GrimoireConfig::default();
        config.set("cache-name", "grimoire-v2").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = GrimoireConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.cache_name, "grimoire-v2");
    }

    #[test]
    fn partial_document_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"cache_name":"grimoire-v9"}"#,
        )
        .unwrap();
        let loaded = GrimoireConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.cache_name, "grimoire-v9");
        assert_eq!(loaded.source_url, GrimoireConfig::default().source_url);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut config = GrimoireConfig::default();
        assert!(config.set("colour", "mauve").is_err());
        assert!(config.get("colour").is_none());
    }
}
