//! Periodic telemetry refresh with sample-data fallback.
//!
//! The [`FeedRefresher`] fetches live telemetry for one region on a fixed
//! interval (30 seconds by default), normalizes it, and publishes the result
//! as a whole [`FlightSnapshot`]. When the fetch fails or the payload has the
//! wrong shape it substitutes a synthetic fleet and attaches a notice so the
//! user knows the aircraft on screen are not real.
//!
//! # Example
//!
//! ```ignore
//! let mut refresher = FeedRefresher::new(config, Arc::new(OfflineSource));
//! let updates = refresher.subscribe();
//! let status = refresher.status_handle();
//!
//! let (flights_tx, flights_rx) = watch::channel(FlightSnapshot::from(Vec::new()));
//! tokio::spawn(refresher.run(flights_tx, cancellation.clone()));
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::flight::{FlightRecord, FlightSnapshot};
use crate::normalize::{normalize, DataFormatError};
use crate::region::Region;
use crate::sample::SampleDataSynthesizer;
use crate::source::{FlightSource, SourceError};

/// Default period between telemetry fetches.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Errors producing a live flight list.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Fetching the payload failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The payload had the wrong shape.
    #[error(transparent)]
    Format(#[from] DataFormatError),

    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Task(String),
}

/// Where a published flight set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Normalized live telemetry.
    Live,
    /// Synthetic demonstration fleet.
    Sample,
}

/// Refresher settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Region to fetch.
    pub region: Region,
    /// Period between fetches.
    pub refresh_interval: Duration,
    /// Seed for the fallback synthesizer; OS entropy when unset.
    pub sample_seed: Option<u64>,
}

impl FeedConfig {
    /// Settings for `region` with default interval and no seed.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            sample_seed: None,
        }
    }

    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the fallback synthesizer seed.
    pub fn with_sample_seed(mut self, seed: Option<u64>) -> Self {
        self.sample_seed = seed;
        self
    }
}

/// Result of one refresh.
#[derive(Debug, Clone)]
pub struct FeedUpdate {
    /// The new flight set.
    pub flights: FlightSnapshot,
    /// Live or sample.
    pub origin: DataOrigin,
    /// User-visible notice, set when sample data is shown.
    pub notice: Option<String>,
    /// When the refresh completed.
    pub fetched_at: DateTime<Utc>,
}

impl FeedUpdate {
    /// Returns true if the flights are synthetic.
    pub fn is_sample(&self) -> bool {
        self.origin == DataOrigin::Sample
    }
}

/// Counters describing the refresher's history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStatus {
    /// Completed refreshes.
    pub refreshes: u64,
    /// Refreshes that produced live data.
    pub live: u64,
    /// Refreshes that fell back to sample data.
    pub fallbacks: u64,
    /// Flights in the latest set.
    pub last_count: usize,
    /// Origin of the latest set.
    pub last_origin: Option<DataOrigin>,
    /// Reason for the most recent fallback.
    pub last_error: Option<String>,
}

/// Shared, read-mostly view of a refresher's [`FeedStatus`].
#[derive(Debug, Clone, Default)]
pub struct FeedStatusHandle {
    inner: Arc<RwLock<FeedStatus>>,
}

impl FeedStatusHandle {
    /// Snapshot of the current status.
    pub fn get(&self) -> FeedStatus {
        self.inner.read().clone()
    }

    fn record(&self, update: &FeedUpdate, error: Option<&FeedError>) {
        let mut status = self.inner.write();
        status.refreshes += 1;
        match update.origin {
            DataOrigin::Live => status.live += 1,
            DataOrigin::Sample => status.fallbacks += 1,
        }
        status.last_count = update.flights.len();
        status.last_origin = Some(update.origin);
        if let Some(error) = error {
            status.last_error = Some(error.to_string());
        }
    }
}

/// Fetch and normalize live telemetry. Blocks on network I/O.
pub fn fetch_live(source: &dyn FlightSource, region: &Region) -> Result<Vec<FlightRecord>, FeedError> {
    let payload = source.fetch_states(region)?;
    Ok(normalize(&payload, region)?)
}

/// Text shown while the synthetic fleet is on screen.
pub fn sample_notice(reason: &FeedError) -> String {
    format!(
        "Live telemetry unavailable ({}). Showing sample data for demonstration.",
        reason
    )
}

/// Periodically refreshes the flight set for one region.
pub struct FeedRefresher {
    config: FeedConfig,
    source: Arc<dyn FlightSource>,
    synthesizer: SampleDataSynthesizer,
    updates: watch::Sender<Option<FeedUpdate>>,
    status: FeedStatusHandle,
}

impl FeedRefresher {
    /// Create a refresher over `source`.
    pub fn new(config: FeedConfig, source: Arc<dyn FlightSource>) -> Self {
        let synthesizer = SampleDataSynthesizer::with_optional_seed(config.sample_seed);
        let (updates, _) = watch::channel(None);
        Self {
            config,
            source,
            synthesizer,
            updates,
            status: FeedStatusHandle::default(),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Receive every [`FeedUpdate`] (origin and notice included).
    pub fn subscribe(&self) -> watch::Receiver<Option<FeedUpdate>> {
        self.updates.subscribe()
    }

    /// Shared status counters.
    pub fn status_handle(&self) -> FeedStatusHandle {
        self.status.clone()
    }

    /// Run one refresh: fetch on the blocking pool, fall back on failure.
    pub async fn refresh_once(&mut self) -> FeedUpdate {
        let source = Arc::clone(&self.source);
        let region = self.config.region.clone();

        let fetched = tokio::task::spawn_blocking(move || fetch_live(source.as_ref(), &region))
            .await
            .unwrap_or_else(|e| Err(FeedError::Task(e.to_string())));

        self.resolve(fetched)
    }

    /// Turn a fetch result into an update, synthesizing on failure.
    pub fn resolve(&mut self, fetched: Result<Vec<FlightRecord>, FeedError>) -> FeedUpdate {
        let region = &self.config.region;
        let (update, error) = match fetched {
            Ok(flights) => {
                info!(
                    source = self.source.name(),
                    region = %region.key,
                    flights = flights.len(),
                    "Live telemetry refreshed"
                );
                let update = FeedUpdate {
                    flights: Arc::from(flights),
                    origin: DataOrigin::Live,
                    notice: None,
                    fetched_at: Utc::now(),
                };
                (update, None)
            }
            Err(error) => {
                warn!(
                    source = self.source.name(),
                    region = %region.key,
                    error = %error,
                    "Telemetry unavailable, using sample data"
                );
                let update = FeedUpdate {
                    flights: Arc::from(self.synthesizer.synthesize(region)),
                    origin: DataOrigin::Sample,
                    notice: Some(sample_notice(&error)),
                    fetched_at: Utc::now(),
                };
                (update, Some(error))
            }
        };

        self.status.record(&update, error.as_ref());
        self.updates.send_replace(Some(update.clone()));
        update
    }

    /// Refresh immediately, then every `refresh_interval`, until cancelled.
    ///
    /// Each refresh replaces the value in `flights_tx` as a whole.
    pub async fn run(
        mut self,
        flights_tx: watch::Sender<FlightSnapshot>,
        cancellation: CancellationToken,
    ) {
        info!(
            region = %self.config.region.key,
            interval_secs = self.config.refresh_interval.as_secs(),
            source = self.source.name(),
            "Feed refresher started"
        );

        let mut interval = tokio::time::interval(self.config.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = cancellation.cancelled() => break,

                _ = interval.tick() => {
                    let update = tokio::select! {
                        biased;
                        _ = cancellation.cancelled() => break,
                        update = self.refresh_once() => update,
                    };
                    debug!(origin = ?update.origin, flights = update.flights.len(), "Publishing flight set");
                    flights_tx.send_replace(update.flights);
                }
            }
        }

        info!("Feed refresher stopped");
    }
}
