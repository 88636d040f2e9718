// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Table holding FrameX settings inside a config file
const CONFIG_TABLE: &str = "framex";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter seeded with defaults
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Self::default_values()),
            config_file_path: RwLock::new(None),
        }
    }

    fn default_values() -> HashMap<String, String> {
        let data_dir = std::env::temp_dir().join("framex");
        [
            (keys::SCENE_SENSITIVITY, "0.2".to_string()),
            (keys::DEDUPE_MODE, "0".to_string()),
            (keys::PAD_MULTIPLE, "2".to_string()),
            (keys::COMPRESSION_LEVEL, "3".to_string()),
            (keys::FFMPEG_PATH, "ffmpeg".to_string()),
            (keys::DATA_DIR, data_dir.to_string_lossy().into_owned()),
            (keys::LOG_LEVEL, "info".to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }

    /// Files probed when no config path is given
    pub fn default_config_paths() -> [PathBuf; 2] {
        [
            PathBuf::from("framex.toml"),
            PathBuf::from("config").join("framex.toml"),
        ]
    }

    /// Set a single value, replacing any earlier layer
    pub fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut config = self.write_lock()?;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    /// Merge the `[framex]` table of the file at `path`
    pub fn load_config(&self, path: &Path) -> Result<(), DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        self.load_str(&content)?;
        *self
            .config_file_path
            .write()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))? =
            Some(path.to_path_buf());

        tracing::info!("Loaded config from {}", path.display());
        Ok(())
    }

    /// Merge the `[framex]` table of a TOML document.
    ///
    /// Strings, numbers and booleans are accepted and stored as text.
    pub fn load_str(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))?;

        let Some(table) = parsed.get(CONFIG_TABLE).and_then(toml::Value::as_table) else {
            return Ok(());
        };

        let mut config = self.write_lock()?;
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(DomainError::ConfigError(format!(
                        "Unsupported value for {}: {}",
                        key, other
                    )))
                }
            };
            config.insert(key.clone(), text);
        }

        Ok(())
    }

    /// Path of the last file loaded, if any
    pub fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path
            .read()
            .ok()
            .and_then(|path| path.clone())
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .write()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        let config = self
            .config
            .read()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))?;
        Ok(config.get(key).cloned())
    }
}
