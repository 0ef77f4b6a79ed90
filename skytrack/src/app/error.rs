//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::source::SourceError;

/// Errors that can occur while assembling or starting the application.
#[derive(Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// The telemetry source could not be created.
    Source(SourceError),

    /// The requested region is not in the region table.
    UnknownRegion(String),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            AppError::Source(e) => write!(f, "Failed to create telemetry source: {}", e),
            AppError::UnknownRegion(key) => write!(f, "Unknown region '{}'", key),
            AppError::RuntimeCreation(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Logging(e) => Some(e),
            AppError::Source(e) => Some(e),
            AppError::UnknownRegion(_) => None,
            AppError::RuntimeCreation(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<LoggingError> for AppError {
    fn from(e: LoggingError) -> Self {
        AppError::Logging(e)
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Source(e)
    }
}
