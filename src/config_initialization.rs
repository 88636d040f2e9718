//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::error::{FrameXError, FrameXResult};
use crate::ports::keys;

/// Environment variables mapped onto config keys
const ENV_MAPPINGS: [(&str, &str); 7] = [
    ("FRAMEX_SCENE_SENSITIVITY", keys::SCENE_SENSITIVITY),
    ("FRAMEX_DEDUPE_MODE", keys::DEDUPE_MODE),
    ("FRAMEX_PAD_MULTIPLE", keys::PAD_MULTIPLE),
    ("FRAMEX_COMPRESSION_LEVEL", keys::COMPRESSION_LEVEL),
    ("FRAMEX_FFMPEG_PATH", keys::FFMPEG_PATH),
    ("FRAMEX_DATA_DIR", keys::DATA_DIR),
    ("FRAMEX_LOG_LEVEL", keys::LOG_LEVEL),
];

/// Build the configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> FrameXResult<TomlConfigAdapter> {
    let config = TomlConfigAdapter::new();

    load_config_file(&config, cli.config.as_deref())?;
    load_environment_variables(&config, |name| std::env::var(name).ok())?;
    apply_cli_configuration_overrides(&config, cli)?;

    debug!("Configuration hierarchy initialized");
    Ok(config)
}

/// Load the explicit config file, or the first default location that exists.
///
/// An explicit path that cannot be read is an error; missing defaults are not.
pub fn load_config_file(config: &TomlConfigAdapter, explicit: Option<&Path>) -> FrameXResult<()> {
    if let Some(path) = explicit {
        return config.load_config(path).map_err(config_error);
    }

    let found: Option<PathBuf> = TomlConfigAdapter::default_config_paths()
        .into_iter()
        .find(|path| path.is_file());

    match found {
        Some(path) => config.load_config(&path).map_err(config_error),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(())
        }
    }
}

/// Apply `FRAMEX_*` overrides read through `lookup`
pub fn load_environment_variables<F>(config: &TomlConfigAdapter, lookup: F) -> FrameXResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            config.set_config(key, &value).map_err(config_error)?;
            env_overrides += 1;
        }
    }

    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(())
}

/// Apply command-line overrides to configuration
pub fn apply_cli_configuration_overrides(config: &TomlConfigAdapter, cli: &Cli) -> FrameXResult<()> {
    let mut overrides: Vec<(&str, String)> = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push((keys::LOG_LEVEL, level.clone()));
    }
    if let Some(path) = &cli.ffmpeg_path {
        overrides.push((keys::FFMPEG_PATH, path.to_string_lossy().into_owned()));
    }
    if let Some(dir) = &cli.data_dir {
        overrides.push((keys::DATA_DIR, dir.to_string_lossy().into_owned()));
    }
    if let Commands::Scenes(args) = &cli.command {
        if let Some(sensitivity) = args.sensitivity {
            overrides.push((keys::SCENE_SENSITIVITY, sensitivity.to_string()));
        }
    }

    for (key, value) in &overrides {
        debug!("CLI override: {} = {}", key, value);
        config.set_config(key, value).map_err(config_error)?;
    }
    Ok(())
}

fn config_error(e: crate::domain::errors::DomainError) -> FrameXError {
    FrameXError::ConfigError {
        message: e.to_string(),
    }
}
