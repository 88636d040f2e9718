//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::FrameSize;
use crate::error::{FrameXError, FrameXResult};

/// Parse `WIDTHxHEIGHT`
pub fn parse_frame_size(s: &str) -> FrameXResult<FrameSize> {
    s.parse::<FrameSize>()
        .map_err(|_| FrameXError::InvalidFrameSize {
            size: s.to_string(),
        })
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Delete the input after a successful run
    #[arg(long)]
    pub delete_source: bool,

    /// Log a non-zero engine exit as a warning and count outputs anyway
    #[arg(long)]
    pub tolerate_engine_errors: bool,
}

/// Arguments for the frames command
#[derive(Args, Debug)]
pub struct FramesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output frame rate
    #[arg(short, long)]
    pub rate: Option<f32>,

    /// Scale frames to WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_frame_size)]
    pub size: Option<FrameSize>,

    /// Drop near-duplicate frames
    #[arg(long)]
    pub dedupe: bool,

    /// Approximate number of frames in the input, used to pick progress logging
    #[arg(long)]
    pub expected_frames: Option<usize>,
}

/// Arguments for the scenes command
#[derive(Args, Debug)]
pub struct ScenesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Treat the input as a directory of extracted frames
    #[arg(long)]
    pub from_frames: bool,

    /// Input frame rate
    #[arg(short, long)]
    pub rate: Option<f32>,

    /// Scene change threshold (0.0-1.0), overrides the configured one
    #[arg(long)]
    pub sensitivity: Option<f32>,
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep transparency
    #[arg(long)]
    pub alpha: bool,

    /// Scale images to WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_frame_size)]
    pub size: Option<FrameSize>,
}

/// Arguments for the image command
#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Scale the image to WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_frame_size)]
    pub size: Option<FrameSize>,
}

/// Arguments for the frame command
#[derive(Args, Debug)]
pub struct FrameArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Zero-based frame index
    #[arg(short = 'n', long)]
    pub number: u64,
}

/// Arguments for the last-frame command
#[derive(Args, Debug)]
pub struct LastFrameArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Scale the frame to WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_frame_size)]
    pub size: Option<FrameSize>,
}
