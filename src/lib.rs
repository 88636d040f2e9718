//! FrameX frame extraction library
//!
//! Plans and runs ffmpeg invocations that turn videos into numbered PNG
//! sequences, keep scene-change frames, or import directories of stills.

pub mod adapters;
pub mod app;
pub mod builder;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, ExtractInteractor};
pub use builder::{EngineInput, ExtractionArgumentBuilder};
pub use domain::errors::DomainError;
pub use domain::model::{ExtractionMode, ExtractionRequest, OutputReport, TrimWindow};
pub use error::{FrameXError, FrameXResult};
pub use manifest::PathManifestBuilder;
pub use planner::{TrimPlan, TrimPlanner};
