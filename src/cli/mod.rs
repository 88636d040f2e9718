//! CLI module for FrameX
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::utils::time::TimeParser;

pub mod args;
pub mod commands;

/// FrameX frame extraction tool
///
/// Turns videos into numbered PNG sequences, detects scene changes and
/// imports still images through ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "framex")]
#[command(about = "FrameX - Frame extraction and image sequence import")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Trim start (SS, MM:SS or HH:MM:SS)
    #[arg(long, global = true, value_parser = TimeParser::parse_seconds)]
    pub trim_start: Option<i64>,

    /// Trim end (SS, MM:SS or HH:MM:SS)
    #[arg(long, global = true, value_parser = TimeParser::parse_seconds)]
    pub trim_end: Option<i64>,

    /// Config file (defaults to framex.toml or config/framex.toml)
    #[arg(long, global = true, env = "FRAMEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level, overrides the configured one
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Engine binary, overrides the configured one
    #[arg(long, global = true)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Directory for concat manifests, overrides the configured one
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract every frame of a video into a PNG sequence
    Frames(args::FramesArgs),
    /// Keep only frames that start a new scene
    Scenes(args::ScenesArgs),
    /// Convert a directory of images into a PNG sequence
    Import(args::ImportArgs),
    /// Convert one image file
    Image(args::ImageArgs),
    /// Extract one frame by index
    Frame(args::FrameArgs),
    /// Extract the last frame of a video
    LastFrame(args::LastFrameArgs),
}
