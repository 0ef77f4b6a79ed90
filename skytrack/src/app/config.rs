//! Application configuration for `SkyTrackApp`.
//!
//! `AppConfig` gathers the settings of every component from the loaded
//! `ConfigFile`, so the CLI only applies its own overrides on top.

use std::time::Duration;

use super::error::AppError;
use crate::animation::AnimationConfig;
use crate::config::ConfigFile;
use crate::feed::FeedConfig;
use crate::logging::LoggingConfig;
use crate::region::{Region, RegionTable};
use crate::source::SourceConfig;

/// Application configuration combining all component configs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Refresh settings, including the selected region.
    pub feed: FeedConfig,

    /// HTTP source settings.
    pub source: SourceConfig,

    /// Animation settings.
    pub animation: AnimationConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Never contact the network; always show sample data.
    pub offline: bool,

    /// Regions available for selection.
    pub regions: RegionTable,
}

impl AppConfig {
    /// Defaults for `region`.
    pub fn new(region: Region) -> Self {
        Self {
            feed: FeedConfig::new(region),
            source: SourceConfig::default(),
            animation: AnimationConfig::default(),
            logging: LoggingConfig::default(),
            offline: false,
            regions: RegionTable::builtin(),
        }
    }

    /// Create application config from the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownRegion`] if `feed.region` names no region.
    pub fn from_config_file(config: &ConfigFile, regions: RegionTable) -> Result<Self, AppError> {
        let region = regions
            .get(&config.feed.region)
            .cloned()
            .ok_or_else(|| AppError::UnknownRegion(config.feed.region.clone()))?;

        Ok(Self {
            feed: FeedConfig::new(region)
                .with_refresh_interval(Duration::from_secs(config.feed.refresh_interval_secs))
                .with_sample_seed(config.feed.sample_seed),
            source: SourceConfig {
                url: config.source.url.clone(),
                timeout: Duration::from_secs(config.source.timeout_secs),
            },
            animation: AnimationConfig::default()
                .with_tick_interval(Duration::from_millis(config.animation.tick_interval_ms)),
            logging: LoggingConfig::default()
                .with_level(config.logging.level.clone())
                .with_directory(config.logging.directory.clone()),
            offline: false,
            regions,
        })
    }

    /// Select a different region by key.
    pub fn with_region(mut self, key: &str) -> Result<Self, AppError> {
        let region = self
            .regions
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::UnknownRegion(key.to_string()))?;
        self.feed.region = region;
        Ok(self)
    }

    /// Set the sample data seed.
    pub fn with_sample_seed(mut self, seed: Option<u64>) -> Self {
        self.feed.sample_seed = seed;
        self
    }

    /// Force sample data.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.feed.refresh_interval = interval;
        self
    }

    /// Set the animation tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.animation.tick_interval = interval;
        self
    }

    /// The selected region.
    pub fn region(&self) -> &Region {
        &self.feed.region
    }
}
