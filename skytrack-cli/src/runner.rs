//! Shared start-up for commands that need configuration and logging.

use skytrack::app::AppConfig;
use skytrack::config::{config_file_path, ConfigFile};
use skytrack::logging::{init_logging, LoggingConfig, WorkerGuard};
use skytrack::region::RegionTable;
use tracing::info;

use crate::error::CliError;

/// Loads the config file and installs logging for one command invocation.
pub struct CliRunner {
    config: ConfigFile,
    // flushes the log file on drop
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load configuration and initialize logging.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = LoggingConfig::default()
            .with_level(config.logging.level.clone())
            .with_directory(config.logging.directory.clone());
        let guard = init_logging(&logging)?;

        Ok(Self {
            config,
            _log_guard: guard,
        })
    }

    /// Application config from the file, with an optional region override.
    pub fn app_config(&self, region: Option<&str>) -> Result<AppConfig, CliError> {
        let app = AppConfig::from_config_file(&self.config, RegionTable::builtin())?;
        match region {
            Some(key) => Ok(app.with_region(key)?),
            None => Ok(app),
        }
    }

    /// Log the command being run and where configuration came from.
    pub fn log_startup(&self, command: &str) {
        info!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %config_file_path().display(),
            region = %self.config.feed.region,
            "SkyTrack starting"
        );
    }
}
