//! CLI error type.

use std::fmt;
use std::path::PathBuf;

use skytrack::app::AppError;
use skytrack::config::ConfigError;
use skytrack::logging::LoggingError;
use skytrack::normalize::DataFormatError;

/// Errors reported by CLI commands. Any of them ends the process with exit code 1.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem, with a user-facing message.
    Config(String),

    /// Application start-up failed.
    App(AppError),

    /// Reading an input file failed.
    Read { path: PathBuf, source: std::io::Error },

    /// Input was not valid JSON.
    Json(serde_json::Error),

    /// Telemetry payload had the wrong shape.
    Format(DataFormatError),

    /// A command-line argument is unusable.
    InvalidArgument(String),

    /// Runtime or signal-handler setup failed.
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::App(e) => write!(f, "{}", e),
            CliError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Format(e) => write!(f, "Invalid telemetry payload: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "{}", msg),
            CliError::Runtime(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Read { source, .. } => Some(source),
            CliError::Json(e) => Some(e),
            CliError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::App(AppError::Logging(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<DataFormatError> for CliError {
    fn from(e: DataFormatError) -> Self {
        CliError::Format(e)
    }
}
