//! FrameX command-line frame extractor
//!
//! Extracts numbered PNG sequences, scene-change frames and single stills
//! from videos and image directories using ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! framex frames --input video.mp4 --output frames/ --rate 24
//! framex scenes --input video.mp4 --output scenes/ --trim-start 05:00 --trim-end 06:00
//! framex import --input stills/ --output frames/ --alpha
//! framex last-frame --input video.mp4 --output thumbs/
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use framex_cli::app::DefaultAppContainer;
use framex_cli::cli::{commands, Cli, LogFormat};
use framex_cli::config_initialization::initialize_configuration_hierarchy;
use framex_cli::ports::{keys, ConfigPort};
use framex_cli::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the FrameX CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Arc::new(
        initialize_configuration_hierarchy(&cli).context("Failed to load configuration")?,
    );

    let level = config
        .get_config_or_default(keys::LOG_LEVEL, "info")
        .await
        .context("Failed to read log level")?;
    let logging = LoggingSystem::new(LoggingConfig {
        level,
        json: cli.log_format == LogFormat::Json,
    });
    logging.initialize().context("Failed to initialize logging")?;
    logging.log_system_info();

    let container = DefaultAppContainer::new(config)
        .await
        .context("Failed to initialize application")?;

    match commands::execute(&cli, &container).await {
        Ok(report) => {
            info!(
                produced = report.produced_count,
                invoked = report.invoked,
                "FrameX completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
