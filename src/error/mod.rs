//! Error handling module for FrameX

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for FrameX operations
#[derive(Error, Debug)]
pub enum FrameXError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS, MM:SS, or seconds")]
    InvalidTimeFormat { time: String },

    /// Frame size argument could not be parsed
    #[error("Invalid frame size: {size}. Expected WIDTHxHEIGHT")]
    InvalidFrameSize { size: String },

    /// Configuration file or override error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Error raised by the extraction core
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for FrameX operations
pub type FrameXResult<T> = std::result::Result<T, FrameXError>;
