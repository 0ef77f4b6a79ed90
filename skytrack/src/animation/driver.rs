//! Async owner of the animation scheduler.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::scheduler::{AnimationConfig, AnimationScheduler, SchedulerState};
use crate::flight::FlightSnapshot;

/// Runs an [`AnimationScheduler`] against watch channels.
///
/// Every set received on the input channel is installed and republished
/// right away, so consumers see it before the first tick. Flights already
/// being animated keep their animated positions in that publication. While the
/// scheduler is running, a timer fires every `tick_interval` and the
/// animated snapshot is published. Installing a new set while running does
/// not restart the timer.
#[derive(Debug)]
pub struct AnimationDriver {
    scheduler: AnimationScheduler,
    ticker: Option<Interval>,
}

impl AnimationDriver {
    /// Create a driver with an idle scheduler.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            scheduler: AnimationScheduler::new(config),
            ticker: None,
        }
    }

    /// Spawn [`run`](Self::run) on the current runtime.
    pub fn spawn(
        self,
        flights_rx: watch::Receiver<FlightSnapshot>,
        output_tx: watch::Sender<FlightSnapshot>,
        cancellation: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(flights_rx, output_tx, cancellation))
    }

    /// Drive the scheduler until cancelled or the input sender is dropped.
    ///
    /// The value already held by `flights_rx` is installed first.
    pub async fn run(
        mut self,
        mut flights_rx: watch::Receiver<FlightSnapshot>,
        output_tx: watch::Sender<FlightSnapshot>,
        cancellation: CancellationToken,
    ) {
        info!(
            tick_interval_ms = self.scheduler.config().tick_interval.as_millis() as u64,
            "Animation driver started"
        );

        let initial = flights_rx.borrow_and_update().clone();
        self.install(initial, &output_tx);

        loop {
            tokio::select! {
                biased;

                _ = cancellation.cancelled() => break,

                changed = flights_rx.changed() => {
                    if changed.is_err() {
                        debug!("Flight feed closed");
                        break;
                    }
                    let snapshot = flights_rx.borrow_and_update().clone();
                    self.install(snapshot, &output_tx);
                }

                _ = next_tick(&mut self.ticker) => {
                    if let Some(snapshot) = self.scheduler.tick() {
                        output_tx.send_replace(snapshot);
                    }
                }
            }
        }

        self.ticker = None;
        self.scheduler.teardown();
        output_tx.send_replace(Arc::from(Vec::new()));
        info!("Animation driver stopped");
    }

    fn install(&mut self, snapshot: FlightSnapshot, output_tx: &watch::Sender<FlightSnapshot>) {
        let state = self.scheduler.install(snapshot);
        output_tx.send_replace(self.scheduler.displayed());

        match (state, self.ticker.is_some()) {
            (SchedulerState::Running, false) => {
                let period = self.scheduler.config().tick_interval;
                let mut ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
                debug!("Animation timer started");
            }
            (SchedulerState::Idle, true) => {
                self.ticker = None;
                debug!("Animation timer stopped");
            }
            _ => {}
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

/// Resolves on the next tick, or never when no timer is active.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
