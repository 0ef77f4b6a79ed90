//! Application bootstrap implementation.
//!
//! `SkyTrackApp` starts the feed refresher and the animation driver on the
//! caller's runtime, wires them together with watch channels, and tears both
//! down from a single cancellation token.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::config::AppConfig;
use super::error::AppError;
use crate::animation::AnimationDriver;
use crate::feed::{FeedRefresher, FeedStatus, FeedStatusHandle, FeedUpdate};
use crate::flight::FlightSnapshot;
use crate::source::{FlightSource, OfflineSource, OpenSkySource};

/// Running SkyTrack pipeline.
///
/// ```text
/// FeedRefresher ──flights──► AnimationDriver ──animated──► consumer
///        └─────updates (origin, notice)──────────────────► consumer
/// ```
///
/// # Example
///
/// ```ignore
/// use skytrack::app::{AppConfig, SkyTrackApp};
///
/// let app = SkyTrackApp::start(config)?;
/// let mut animated = app.animated();
/// while animated.changed().await.is_ok() {
///     render(&animated.borrow_and_update());
/// }
/// app.shutdown().await;
/// ```
pub struct SkyTrackApp {
    config: AppConfig,
    cancellation: CancellationToken,
    animated: watch::Receiver<FlightSnapshot>,
    updates: watch::Receiver<Option<FeedUpdate>>,
    status: FeedStatusHandle,
    refresher_task: JoinHandle<()>,
    driver_task: JoinHandle<()>,
}

impl SkyTrackApp {
    /// Start with the source selected by the configuration.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let source: Arc<dyn FlightSource> = if config.offline {
            Arc::new(OfflineSource)
        } else {
            Arc::new(OpenSkySource::from_config(&config.source)?)
        };
        Ok(Self::start_with_source(config, source))
    }

    /// Start with an explicit telemetry source.
    pub fn start_with_source(config: AppConfig, source: Arc<dyn FlightSource>) -> Self {
        info!(
            region = %config.region(),
            source = source.name(),
            "Starting SkyTrack"
        );

        let cancellation = CancellationToken::new();

        let refresher = FeedRefresher::new(config.feed.clone(), source);
        let updates = refresher.subscribe();
        let status = refresher.status_handle();

        let (flights_tx, flights_rx) = watch::channel(FlightSnapshot::from(Vec::new()));
        let (animated_tx, animated) = watch::channel(FlightSnapshot::from(Vec::new()));

        let refresher_task = tokio::spawn(refresher.run(flights_tx, cancellation.clone()));
        let driver_task = AnimationDriver::new(config.animation.clone()).spawn(
            flights_rx,
            animated_tx,
            cancellation.clone(),
        );

        Self {
            config,
            cancellation,
            animated,
            updates,
            status,
            refresher_task,
            driver_task,
        }
    }

    /// Configuration the app was started with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Receiver of animated snapshots.
    pub fn animated(&self) -> watch::Receiver<FlightSnapshot> {
        self.animated.clone()
    }

    /// Receiver of refresh results.
    pub fn updates(&self) -> watch::Receiver<Option<FeedUpdate>> {
        self.updates.clone()
    }

    /// Refresher counters.
    pub fn status(&self) -> FeedStatus {
        self.status.get()
    }

    /// Token that stops the pipeline when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Cancel both tasks and wait for them to finish.
    pub async fn shutdown(self) {
        self.cancellation.cancel();
        for (name, task) in [
            ("refresher", self.refresher_task),
            ("animation", self.driver_task),
        ] {
            if let Err(e) = task.await {
                warn!(task = name, error = %e, "Task ended abnormally");
            }
        }
        info!("SkyTrack stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use crate::region::RegionTable;

    fn offline_config() -> AppConfig {
        AppConfig::from_config_file(&ConfigFile::default(), RegionTable::builtin())
            .unwrap()
            .with_offline(true)
            .with_sample_seed(Some(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_offline_app_animates_sample_fleet() {
        let app = SkyTrackApp::start(offline_config()).unwrap();
        let mut animated = app.animated();
        let mut updates = app.updates();

        // wait for the first non-empty publication
        let installed = loop {
            animated.changed().await.unwrap();
            let snapshot = animated.borrow_and_update().clone();
            if !snapshot.is_empty() {
                break snapshot;
            }
        };
        assert_eq!(installed.len(), 8);

        updates.changed().await.ok();
        let update = updates.borrow().clone().unwrap();
        assert!(update.is_sample());
        assert!(update.notice.unwrap().contains("offline mode"));

        // cold tick, then movement
        animated.changed().await.unwrap();
        animated.changed().await.unwrap();
        let moved = animated.borrow_and_update().clone();
        assert_ne!(moved[0].latitude, installed[0].latitude);
        assert_eq!(moved[0].id, installed[0].id);

        let status = app.status();
        assert_eq!(status.fallbacks, 1);
        app.shutdown().await;
    }
}
