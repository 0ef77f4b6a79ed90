//! Synthetic demonstration fleet.
//!
//! When live telemetry is unavailable the feed shows eight plausible
//! aircraft placed around the selected region's center. Each comes from a
//! fixed base pattern with a little random jitter so refreshes look alive.
//!
//! The random source is injected, so a seeded synthesizer is reproducible:
//!
//! ```
//! use skytrack::region::RegionTable;
//! use skytrack::sample::SampleDataSynthesizer;
//!
//! let regions = RegionTable::builtin();
//! let india = regions.get("india").unwrap();
//!
//! let a = SampleDataSynthesizer::seeded(7).synthesize_at(india, 1_700_000_000_000);
//! let b = SampleDataSynthesizer::seeded(7).synthesize_at(india, 1_700_000_000_000);
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 8);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::flight::FlightRecord;
use crate::geo::{self, ESTIMATE_HORIZON};
use crate::region::Region;

/// Full width of the position jitter in degrees (±0.25°).
const POSITION_JITTER_DEG: f64 = 0.5;
/// Full width of the altitude jitter in metres (±1000 m).
const ALTITUDE_JITTER_M: f64 = 2000.0;
/// Full width of the speed jitter in m/s (±25).
const SPEED_JITTER_MPS: f64 = 50.0;
/// Full width of the vertical rate jitter in m/s (±75).
const VERTICAL_RATE_JITTER_MPS: f64 = 150.0;
/// Full width of the heading jitter in degrees (±10°).
const HEADING_JITTER_DEG: f64 = 20.0;
/// Synthetic reports are at most this old.
const MAX_REPORT_AGE_MS: f64 = 60_000.0;

/// A base flight the synthesizer jitters around.
#[derive(Debug, Clone, Copy)]
struct Pattern {
    callsign: &'static str,
    lat_offset: f64,
    lng_offset: f64,
    altitude_m: f64,
    speed_mps: f64,
    heading_deg: f64,
}

const fn pattern(
    callsign: &'static str,
    lat_offset: f64,
    lng_offset: f64,
    altitude_m: f64,
    speed_mps: f64,
    heading_deg: f64,
) -> Pattern {
    Pattern {
        callsign,
        lat_offset,
        lng_offset,
        altitude_m,
        speed_mps,
        heading_deg,
    }
}

const PATTERNS: [Pattern; 8] = [
    pattern("AI101", 2.0, -3.0, 12_000.0, 250.0, 45.0),
    pattern("6E456", -1.0, 2.0, 15_000.0, 280.0, 135.0),
    pattern("SG789", 3.0, 1.0, 10_000.0, 220.0, 225.0),
    pattern("UK234", -2.0, -2.0, 18_000.0, 300.0, 315.0),
    pattern("9W567", 1.0, 3.0, 14_000.0, 260.0, 90.0),
    pattern("IX890", -3.0, 1.0, 11_000.0, 240.0, 180.0),
    pattern("G8123", 2.0, -1.0, 16_000.0, 290.0, 270.0),
    pattern("I5456", -1.0, -3.0, 9_000.0, 200.0, 0.0),
];

/// Number of records every synthesis produces.
pub const SAMPLE_FLEET_SIZE: usize = PATTERNS.len();

/// Generates a synthetic fleet for a region.
#[derive(Debug)]
pub struct SampleDataSynthesizer<R = StdRng> {
    rng: R,
}

impl SampleDataSynthesizer<StdRng> {
    /// Synthesizer seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible synthesizer.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, otherwise from the operating system.
    pub fn with_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> SampleDataSynthesizer<R> {
    /// Create a synthesizer drawing jitter from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Synthesize a fleet stamped relative to the current wall clock.
    pub fn synthesize(&mut self, region: &Region) -> Vec<FlightRecord> {
        self.synthesize_at(region, chrono::Utc::now().timestamp_millis())
    }

    /// Synthesize a fleet with report times within the minute before `now_ms`.
    pub fn synthesize_at(&mut self, region: &Region, now_ms: i64) -> Vec<FlightRecord> {
        PATTERNS
            .iter()
            .enumerate()
            .map(|(index, pattern)| self.jittered(index, pattern, region, now_ms))
            .collect()
    }

    fn jittered(
        &mut self,
        index: usize,
        pattern: &Pattern,
        region: &Region,
        now_ms: i64,
    ) -> FlightRecord {
        // one draw shifts both axes
        let shift = self.spread(POSITION_JITTER_DEG);
        let latitude = region.center.latitude + pattern.lat_offset + shift;
        let longitude = geo::wrap_longitude(region.center.longitude + pattern.lng_offset + shift);

        let altitude_m = pattern.altitude_m + self.spread(ALTITUDE_JITTER_M);
        let speed_mps = pattern.speed_mps + self.spread(SPEED_JITTER_MPS);
        let vertical_rate_mps = self.spread(VERTICAL_RATE_JITTER_MPS);
        let heading_deg =
            geo::normalize_heading(pattern.heading_deg + self.spread(HEADING_JITTER_DEG));

        let squawk: u16 = self.rng.random_range(1000..10000);
        let age_ms = (self.rng.random::<f64>() * MAX_REPORT_AGE_MS) as i64;

        FlightRecord {
            id: format!("sample{}", index + 1),
            callsign: pattern.callsign.to_string(),
            origin_country: region.name.clone(),
            latitude,
            longitude,
            altitude_m: Some(altitude_m),
            ground_speed_mps: Some(speed_mps),
            vertical_rate_mps: Some(vertical_rate_mps),
            heading_deg: Some(heading_deg),
            timestamp_ms: now_ms - age_ms,
            squawk: squawk.to_string(),
            on_ground: false,
            estimated_destination: geo::project(
                latitude,
                longitude,
                Some(heading_deg),
                Some(speed_mps),
                ESTIMATE_HORIZON,
            ),
        }
    }

    /// Uniform value in `[-width / 2, width / 2)`.
    fn spread(&mut self, width: f64) -> f64 {
        (self.rng.random::<f64>() - 0.5) * width
    }
}
