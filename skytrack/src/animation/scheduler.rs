//! Idle/Running animation state machine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::flight::{FlightRecord, FlightSnapshot};
use crate::geo::{self, GeoPoint};

/// Default period between animation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Animation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Period between ticks; also the projection step of each tick.
    pub tick_interval: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl AnimationConfig {
    /// Set the tick interval.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No flights installed, no ticking.
    Idle,
    /// A non-empty set is installed and ticks advance it.
    Running,
}

/// Advances installed flights between refreshes.
///
/// The scheduler owns a previous-position store keyed by flight id. Each
/// [`tick`](Self::tick) projects every flight that has a stored position
/// forward by one step and rebuilds the store from the result. Flights seen
/// for the first time are returned unchanged and start moving on the next
/// tick.
#[derive(Debug)]
pub struct AnimationScheduler {
    config: AnimationConfig,
    state: SchedulerState,
    current: FlightSnapshot,
    previous: HashMap<String, GeoPoint>,
}

impl AnimationScheduler {
    /// Create an idle scheduler.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            state: SchedulerState::Idle,
            current: Arc::from(Vec::new()),
            previous: HashMap::new(),
        }
    }

    /// Create an idle scheduler with default settings.
    pub fn with_defaults() -> Self {
        Self::new(AnimationConfig::default())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Settings in use.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The most recently installed set.
    pub fn current(&self) -> &FlightSnapshot {
        &self.current
    }

    /// Last animated position of a flight, if any.
    pub fn previous_position(&self, id: &str) -> Option<GeoPoint> {
        self.previous.get(id).copied()
    }

    /// Number of flights with a stored position.
    pub fn tracked(&self) -> usize {
        self.previous.len()
    }

    /// Install a freshly refreshed flight set.
    ///
    /// A non-empty set moves the scheduler to `Running`; an empty one to
    /// `Idle`. Installing while running keeps the stored positions, so ids
    /// present in both sets continue from where they were animated.
    pub fn install(&mut self, flights: FlightSnapshot) -> SchedulerState {
        self.current = flights;
        if self.current.is_empty() {
            self.enter_idle();
        } else {
            self.state = SchedulerState::Running;
        }
        debug!(
            flights = self.current.len(),
            tracked = self.previous.len(),
            state = ?self.state,
            "Installed flight set"
        );
        self.state
    }

    /// The installed set as it should be shown right now.
    ///
    /// Flights with a stored position are placed there, so a refresh does
    /// not pull them back to their reported position. New ids are shown as
    /// reported.
    pub fn displayed(&self) -> FlightSnapshot {
        if self.previous.is_empty() {
            return Arc::clone(&self.current);
        }
        self.current
            .iter()
            .map(|flight| match self.previous.get(&flight.id) {
                Some(position) => flight.moved_to(*position),
                None => flight.clone(),
            })
            .collect()
    }

    /// Stop animating and forget every stored position.
    pub fn teardown(&mut self) {
        self.current = Arc::from(Vec::new());
        self.enter_idle();
    }

    /// Advance all flights by one step.
    ///
    /// Returns `None` while idle. Otherwise returns a new snapshot; the
    /// installed records are never modified.
    pub fn tick(&mut self) -> Option<FlightSnapshot> {
        if self.state != SchedulerState::Running {
            return None;
        }

        let step = self.config.tick_interval;
        let animated: Vec<FlightRecord> = self
            .current
            .iter()
            .map(|flight| self.advance(flight, step))
            .collect();

        self.previous = animated
            .iter()
            .map(|f| (f.id.clone(), f.position()))
            .collect();

        trace!(flights = animated.len(), "Animation tick");
        Some(Arc::from(animated))
    }

    fn advance(&self, flight: &FlightRecord, step: Duration) -> FlightRecord {
        let Some(previous) = self.previous.get(&flight.id) else {
            return flight.clone();
        };

        geo::project(
            previous.latitude,
            previous.longitude,
            flight.heading_deg,
            flight.ground_speed_mps,
            step,
        )
        .map(|next| flight.moved_to(next))
        .unwrap_or_else(|| flight.clone())
    }

    fn enter_idle(&mut self) {
        self.state = SchedulerState::Idle;
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::tests::record;

    fn snapshot(flights: Vec<FlightRecord>) -> FlightSnapshot {
        Arc::from(flights)
    }

    fn on_equator(id: &str, speed: f64) -> FlightRecord {
        let mut f = record(id, id, Some(speed));
        f.latitude = 0.0;
        f.longitude = 20.0;
        f.heading_deg = Some(90.0);
        f
    }

    #[test]
    fn test_starts_idle() {
        let mut scheduler = AnimationScheduler::with_defaults();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.tick().is_none());
    }

    #[test]
    fn test_install_transitions() {
        let mut scheduler = AnimationScheduler::with_defaults();
        assert_eq!(
            scheduler.install(snapshot(vec![on_equator("a", 300.0)])),
            SchedulerState::Running
        );
        assert_eq!(scheduler.install(snapshot(vec![])), SchedulerState::Idle);
    }

    #[test]
    fn test_first_tick_is_cold() {
        let mut scheduler = AnimationScheduler::with_defaults();
        let installed = snapshot(vec![on_equator("a", 300.0)]);
        scheduler.install(installed.clone());

        let first = scheduler.tick().unwrap();
        assert_eq!(first[0], installed[0]);
        assert_eq!(scheduler.previous_position("a"), Some(GeoPoint::new(0.0, 20.0)));
    }

    #[test]
    fn test_fast_flight_moves_slow_flight_stays() {
        let mut scheduler = AnimationScheduler::with_defaults();
        scheduler.install(snapshot(vec![on_equator("fast", 300.0), on_equator("slow", 5.0)]));

        scheduler.tick().unwrap();
        let second = scheduler.tick().unwrap();

        let fast = &second[0];
        assert!((fast.longitude - 20.0 - 0.0027).abs() < 0.0001);
        assert!(fast.latitude.abs() < 1e-9);

        let slow = &second[1];
        assert_eq!(slow.latitude, 0.0);
        assert_eq!(slow.longitude, 20.0);
    }

    #[test]
    fn test_only_position_changes() {
        let mut scheduler = AnimationScheduler::with_defaults();
        let installed = on_equator("a", 300.0);
        scheduler.install(snapshot(vec![installed.clone()]));

        scheduler.tick();
        let moved = scheduler.tick().unwrap()[0].clone();

        assert_eq!(moved.id, installed.id);
        assert_eq!(moved.callsign, installed.callsign);
        assert_eq!(moved.altitude_m, installed.altitude_m);
        assert_eq!(moved.heading_deg, installed.heading_deg);
        assert_eq!(moved.timestamp_ms, installed.timestamp_ms);
        assert_eq!(moved.estimated_destination, installed.estimated_destination);
        assert_ne!(moved.longitude, installed.longitude);
    }

    #[test]
    fn test_positions_accumulate_across_ticks() {
        let mut scheduler = AnimationScheduler::with_defaults();
        scheduler.install(snapshot(vec![on_equator("a", 300.0)]));

        scheduler.tick();
        let mut last = 20.0;
        for _ in 0..5 {
            let lng = scheduler.tick().unwrap()[0].longitude;
            assert!(lng > last);
            last = lng;
        }
        assert!((last - 20.0 - 5.0 * 0.002_697_9).abs() < 1e-5);
    }

    #[test]
    fn test_refresh_keeps_surviving_positions() {
        let mut scheduler = AnimationScheduler::with_defaults();
        scheduler.install(snapshot(vec![on_equator("a", 300.0), on_equator("b", 300.0)]));
        scheduler.tick();
        let animated_a = scheduler.tick().unwrap()[0].position();

        // refresh: "a" survives, "b" is gone, "c" is new
        scheduler.install(snapshot(vec![on_equator("a", 300.0), on_equator("c", 300.0)]));
        let next = scheduler.tick().unwrap();

        assert!(next[0].longitude > animated_a.longitude);
        assert_eq!(next[1].longitude, 20.0, "new id starts cold");
        assert!(scheduler.previous_position("b").is_none());
        assert_eq!(scheduler.tracked(), 2);
    }

    #[test]
    fn test_displayed_keeps_animated_positions() {
        let mut scheduler = AnimationScheduler::with_defaults();
        let installed = snapshot(vec![on_equator("a", 300.0)]);
        scheduler.install(installed.clone());
        assert_eq!(scheduler.displayed()[0], installed[0]);

        scheduler.tick();
        let animated = scheduler.tick().unwrap()[0].clone();

        // refresh reports "a" back at its old position, with a new altitude
        let mut refreshed_a = on_equator("a", 300.0);
        refreshed_a.altitude_m = Some(9_000.0);
        scheduler.install(snapshot(vec![refreshed_a, on_equator("c", 300.0)]));

        let shown = scheduler.displayed();
        assert_eq!(shown[0].position(), animated.position());
        assert_eq!(shown[0].altitude_m, Some(9_000.0));
        assert_eq!(shown[1].longitude, 20.0);
    }

    #[test]
    fn test_idle_clears_store() {
        let mut scheduler = AnimationScheduler::with_defaults();
        scheduler.install(snapshot(vec![on_equator("a", 300.0)]));
        scheduler.tick();
        assert_eq!(scheduler.tracked(), 1);

        scheduler.install(snapshot(vec![]));
        assert_eq!(scheduler.tracked(), 0);
        assert!(scheduler.tick().is_none());

        // back to running: cold again
        let installed = snapshot(vec![on_equator("a", 300.0)]);
        scheduler.install(installed.clone());
        assert_eq!(scheduler.tick().unwrap()[0], installed[0]);
    }

    #[test]
    fn test_teardown() {
        let mut scheduler = AnimationScheduler::with_defaults();
        scheduler.install(snapshot(vec![on_equator("a", 300.0)]));
        scheduler.tick();

        scheduler.teardown();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.tracked(), 0);
        assert!(scheduler.current().is_empty());
        assert!(scheduler.tick().is_none());
    }

    #[test]
    fn test_installed_snapshot_is_not_mutated() {
        let mut scheduler = AnimationScheduler::with_defaults();
        let installed = snapshot(vec![on_equator("a", 300.0)]);
        scheduler.install(installed.clone());
        scheduler.tick();
        scheduler.tick();
        assert_eq!(installed[0].longitude, 20.0);
    }

    #[test]
    fn test_tick_interval_scales_step() {
        let config = AnimationConfig::default().with_tick_interval(Duration::from_secs(10));
        let mut scheduler = AnimationScheduler::new(config);
        scheduler.install(snapshot(vec![on_equator("a", 300.0)]));
        scheduler.tick();
        let lng = scheduler.tick().unwrap()[0].longitude;
        assert!((lng - 20.0 - 0.026_979).abs() < 1e-5);
    }
}
