//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::error::{FrameXError, FrameXResult};

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    /// Emit one JSON object per event instead of text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Filter from `RUST_LOG`, falling back to the configured level
    pub fn filter(&self) -> FrameXResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.config.level).map_err(|e| {
                FrameXError::ConfigError {
                    message: format!("Invalid log level '{}': {}", self.config.level, e),
                }
            }),
        }
    }

    /// Install the global subscriber. Logs go to stderr so reports on stdout stay clean.
    pub fn initialize(&self) -> FrameXResult<()> {
        let filter = self.filter()?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let result = if self.config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        result.map_err(|e| FrameXError::ConfigError {
            message: format!("Failed to initialize logging: {}", e),
        })?;

        tracing::debug!(level = %self.config.level, json = self.config.json, "Logging initialized");
        Ok(())
    }

    /// Log version information
    pub fn log_system_info(&self) {
        tracing::debug!("FrameX {}", env!("CARGO_PKG_VERSION"));
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}
