//! Configuration file handling.
//!
//! Settings live in an INI file at `~/.config/skytrack/config.ini` (or the
//! platform equivalent). A missing file means defaults; a missing key means
//! that key's default.
//!
//! ```ini
//! [feed]
//! region = india
//! refresh_interval = 30
//! ; sample_seed = 42
//!
//! [source]
//! url = https://opensky-network.org/api/states/all
//! timeout = 10
//!
//! [animation]
//! tick_interval_ms = 1000
//!
//! [logging]
//! level = info
//! ; directory = /var/log/skytrack
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::logging::{DEFAULT_LOG_LEVEL, LOG_LEVELS};
use crate::region::{RegionTable, DEFAULT_REGION};
use crate::source::{DEFAULT_SOURCE_TIMEOUT, DEFAULT_SOURCE_URL};

/// Application directory name under the platform config directory.
const APP_DIR: &str = "skytrack";
const CONFIG_FILE_NAME: &str = "config.ini";

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Errors reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid INI.
    #[error("config parse error: {0}")]
    Parse(String),

    /// No such `section.key`.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// A value failed validation.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl From<ini::Error> for ConfigError {
    fn from(e: ini::Error) -> Self {
        match e {
            ini::Error::Io(io) => ConfigError::Io(io),
            ini::Error::Parse(p) => ConfigError::Parse(p.to_string()),
        }
    }
}

/// Platform configuration directory for SkyTrack.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Full path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// `[feed]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// Region key.
    pub region: String,
    /// Seconds between telemetry fetches.
    pub refresh_interval_secs: u64,
    /// Fixed seed for sample data.
    pub sample_seed: Option<u64>,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Telemetry endpoint.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// `[animation]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    /// Milliseconds between animation ticks.
    pub tick_interval_ms: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Level directive.
    pub level: String,
    /// Rolling log file directory.
    pub directory: Option<PathBuf>,
}

/// Typed contents of `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub feed: FeedSettings,
    pub source: SourceSettings,
    pub animation: AnimationSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            feed: FeedSettings {
                region: DEFAULT_REGION.to_string(),
                refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
                sample_seed: None,
            },
            source: SourceSettings {
                url: DEFAULT_SOURCE_URL.to_string(),
                timeout_secs: DEFAULT_SOURCE_TIMEOUT.as_secs(),
            },
            animation: AnimationSettings {
                tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_LEVEL.to_string(),
                directory: None,
            },
        }
    }
}

impl ConfigFile {
    /// Load from the default location; defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`; defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Build from parsed INI, validating every present key.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Render as INI. Unset optional keys are omitted.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }
}

/// Every settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    FeedRegion,
    FeedRefreshInterval,
    FeedSampleSeed,
    SourceUrl,
    SourceTimeout,
    AnimationTickIntervalMs,
    LoggingLevel,
    LoggingDirectory,
}

const ALL_KEYS: [ConfigKey; 8] = [
    ConfigKey::FeedRegion,
    ConfigKey::FeedRefreshInterval,
    ConfigKey::FeedSampleSeed,
    ConfigKey::SourceUrl,
    ConfigKey::SourceTimeout,
    ConfigKey::AnimationTickIntervalMs,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingDirectory,
];

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::FeedRegion | ConfigKey::FeedRefreshInterval | ConfigKey::FeedSampleSeed => {
                "feed"
            }
            ConfigKey::SourceUrl | ConfigKey::SourceTimeout => "source",
            ConfigKey::AnimationTickIntervalMs => "animation",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    /// Key within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::FeedRegion => "region",
            ConfigKey::FeedRefreshInterval => "refresh_interval",
            ConfigKey::FeedSampleSeed => "sample_seed",
            ConfigKey::SourceUrl => "url",
            ConfigKey::SourceTimeout => "timeout",
            ConfigKey::AnimationTickIntervalMs => "tick_interval_ms",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Dotted name, e.g. `feed.region`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::FeedRegion => config.feed.region.clone(),
            ConfigKey::FeedRefreshInterval => config.feed.refresh_interval_secs.to_string(),
            ConfigKey::FeedSampleSeed => config
                .feed
                .sample_seed
                .map(|s| s.to_string())
                .unwrap_or_default(),
            ConfigKey::SourceUrl => config.source.url.clone(),
            ConfigKey::SourceTimeout => config.source.timeout_secs.to_string(),
            ConfigKey::AnimationTickIntervalMs => config.animation.tick_interval_ms.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and store `value`. An empty value clears optional keys.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::FeedRegion => {
                let regions = RegionTable::builtin();
                let region = regions.get(value).ok_or_else(|| {
                    let known: Vec<&str> = regions.keys().collect();
                    self.invalid(value, format!("expected one of {}", known.join(", ")))
                })?;
                config.feed.region = region.key.clone();
            }
            ConfigKey::FeedRefreshInterval => {
                config.feed.refresh_interval_secs = self.positive(value)?;
            }
            ConfigKey::FeedSampleSeed => {
                config.feed.sample_seed = if value.is_empty() {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|_| self.invalid(value, "expected an unsigned integer"))?,
                    )
                };
            }
            ConfigKey::SourceUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(self.invalid(value, "expected an http(s) URL"));
                }
                config.source.url = value.to_string();
            }
            ConfigKey::SourceTimeout => {
                config.source.timeout_secs = self.positive(value)?;
            }
            ConfigKey::AnimationTickIntervalMs => {
                config.animation.tick_interval_ms = self.positive(value)?;
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, format!("expected one of {}", LOG_LEVELS.join(", "))));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }

    fn positive(&self, value: &str) -> Result<u64, ConfigError> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.invalid(value, "expected a positive integer")),
        }
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
