//! Recall configuration file handling

use anyhow::{Context, Result};
use recall_theme::{ThemeName, ThemeStoreConfig, THEME_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "recall.toml";

/// Top-level Recall configuration (recall.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RecallConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Durable storage location
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// JSON document holding persisted preferences
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Prefix applied to every key
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".recall/state.json")
}

fn default_namespace() -> String {
    "recall".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            namespace: default_namespace(),
        }
    }
}

/// Theme store settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ThemeConfig {
    /// Storage key for the persisted theme
    #[serde(default = "default_theme_key")]
    pub key: String,
    /// Theme used until a persisted one is loaded
    #[serde(default)]
    pub default: ThemeName,
}

fn default_theme_key() -> String {
    THEME_STORAGE_KEY.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            key: default_theme_key(),
            default: ThemeName::default(),
        }
    }
}

impl ThemeConfig {
    pub fn store_config(&self) -> ThemeStoreConfig {
        ThemeStoreConfig {
            storage_key: self.key.clone(),
            default_theme: self.default,
        }
    }
}

/// Log output settings
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default)]
    pub filter: Option<String>,
}

impl RecallConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `recall.toml` in the working
    /// directory is used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} not found", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = RecallConfig::parse("").unwrap();
        assert_eq!(config, RecallConfig::default());
        assert_eq!(config.storage.namespace, "recall");
        assert_eq!(config.theme.key, "sr-theme");
        assert_eq!(config.theme.default, ThemeName::Dark);
        assert_eq!(config.logging.filter, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = RecallConfig::parse(
            r#"
            [storage]
            path = "/tmp/prefs.json"

            [theme]
            default = "light"

            [logging]
            filter = "recall_theme=debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.storage.namespace, "recall");
        assert_eq!(config.theme.key, "sr-theme");
        assert_eq!(
            config.theme.store_config(),
            ThemeStoreConfig {
                storage_key: "sr-theme".into(),
                default_theme: ThemeName::Light,
            }
        );
        assert_eq!(config.logging.filter.as_deref(), Some("recall_theme=debug"));
    }

    #[test]
    fn test_unknown_default_theme_is_rejected() {
        assert!(RecallConfig::parse("[theme]\ndefault = \"sepia\"").is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = RecallConfig::default();
        config.theme.default = ThemeName::Light;
        let text = config.to_toml().unwrap();
        assert_eq!(RecallConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(RecallConfig::load(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recall.toml");
        fs::write(&path, "[storage]\nnamespace = \"study\"\n").unwrap();

        let config = RecallConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.storage.namespace, "study");
    }
}
