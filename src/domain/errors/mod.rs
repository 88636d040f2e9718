// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Trim window is malformed
    InvalidWindow(String),
    /// Input or output location missing or not writable
    DirectoryUnavailable(String),
    /// The external engine exited with an error or could not be started
    ExternalProcessFailure(String),
    /// Configuration value missing or malformed
    ConfigError(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidWindow(msg) => write!(f, "Invalid trim window: {}", msg),
            DomainError::DirectoryUnavailable(msg) => write!(f, "Directory unavailable: {}", msg),
            DomainError::ExternalProcessFailure(msg) => {
                write!(f, "External process failed: {}", msg)
            }
            DomainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
