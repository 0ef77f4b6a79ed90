//! Telemetry sources.
//!
//! A [`FlightSource`] returns the raw `states/all` payload for a region. The
//! payload is left undecoded beyond JSON so the normalizer owns every
//! decision about which entries are usable.

mod http;
mod opensky;

pub use http::{HttpClient, ReqwestClient};
pub use opensky::OpenSkySource;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::region::Region;

/// Default OpenSky `states/all` endpoint.
pub const DEFAULT_SOURCE_URL: &str = "https://opensky-network.org/api/states/all";

/// Default HTTP request timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors fetching telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body is not valid JSON.
    #[error("invalid JSON: {0}")]
    Decode(String),

    /// The source is deliberately not fetching.
    #[error("{0}")]
    Unavailable(String),
}

/// Settings for the HTTP source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Endpoint URL without query string.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }
}

/// Something that can fetch a raw telemetry payload.
///
/// Implementations block; callers on a runtime use `spawn_blocking`.
pub trait FlightSource: Send + Sync {
    /// Fetch the current state vectors covering `region`.
    fn fetch_states(&self, region: &Region) -> Result<Value, SourceError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// A source that never fetches, forcing the sample fallback.
#[derive(Debug, Clone, Default)]
pub struct OfflineSource;

impl FlightSource for OfflineSource {
    fn fetch_states(&self, _region: &Region) -> Result<Value, SourceError> {
        Err(SourceError::Unavailable("offline mode".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
