// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for running the external frame-processing engine
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run one engine invocation to completion.
    ///
    /// Fails with `ExternalProcessFailure` if the engine cannot be started, or
    /// exits non-zero while `allow_nonzero_exit` is off.
    async fn run(&self, invocation: &Invocation) -> Result<EngineExit, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Regular files directly inside `dir`, sorted by file name
    async fn list_files_sorted(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Count regular files in `dir`, optionally filtered by a wildcard pattern
    async fn count_files(
        &self,
        dir: &Path,
        recursive: bool,
        pattern: Option<&str>,
    ) -> Result<usize, DomainError>;

    /// Check if path exists
    async fn path_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Check if path is an existing directory
    async fn is_directory(&self, path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError>;

    /// Write `content` to `path`, replacing anything already there
    async fn write_text(&self, path: &Path, content: &str) -> Result<(), DomainError>;

    /// Delete a file or a directory tree
    async fn delete_path(&self, path: &Path) -> Result<(), DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        Ok(self
            .get_config(key)
            .await?
            .unwrap_or_else(|| default.to_string()))
    }
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Configuration keys read by the extraction core
pub mod keys {
    pub const SCENE_SENSITIVITY: &str = "scene_sensitivity";
    pub const DEDUPE_MODE: &str = "dedupe_mode";
    pub const PAD_MULTIPLE: &str = "pad_multiple";
    pub const COMPRESSION_LEVEL: &str = "compression_level";
    pub const DATA_DIR: &str = "data_dir";
    pub const FFMPEG_PATH: &str = "ffmpeg_path";
    pub const LOG_LEVEL: &str = "log_level";
}

impl ExtractionSettings {
    /// Snapshot the extraction settings from configuration
    pub async fn load(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        let defaults = ExtractionSettings::default();

        let scene_sensitivity = match config.get_config(keys::SCENE_SENSITIVITY).await? {
            Some(value) => parse_key::<f32>(keys::SCENE_SENSITIVITY, &value)?,
            None => defaults.scene_sensitivity,
        };
        let dedupe_mode = match config.get_config(keys::DEDUPE_MODE).await? {
            Some(value) => DedupeMode::from_selector(parse_key::<i64>(keys::DEDUPE_MODE, &value)?),
            None => defaults.dedupe_mode,
        };
        let pad_multiple = match config.get_config(keys::PAD_MULTIPLE).await? {
            Some(value) => parse_key::<u32>(keys::PAD_MULTIPLE, &value)?,
            None => defaults.pad_multiple,
        };
        let compression_level = match config.get_config(keys::COMPRESSION_LEVEL).await? {
            Some(value) => parse_key::<u8>(keys::COMPRESSION_LEVEL, &value)?,
            None => defaults.compression_level,
        };
        let data_dir = config
            .get_config(keys::DATA_DIR)
            .await?
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        if !(0.0..=1.0).contains(&scene_sensitivity) {
            return Err(DomainError::ConfigError(format!(
                "{} must be between 0.0 and 1.0, got {}",
                keys::SCENE_SENSITIVITY,
                scene_sensitivity
            )));
        }

        Ok(Self {
            scene_sensitivity,
            dedupe_mode,
            pad_multiple,
            compression_level,
            data_dir,
        })
    }
}

fn parse_key<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value.trim().parse::<T>().map_err(|_| {
        DomainError::ConfigError(format!("Invalid value for {}: {}", key, value))
    })
}
