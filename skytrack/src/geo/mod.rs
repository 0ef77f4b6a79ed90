//! Great-circle dead reckoning.
//!
//! Every position estimate in SkyTrack goes through [`project`]: the one-hour
//! destination estimate attached to each flight record and the one-second
//! animation step both call it, differing only in the `duration` argument.
//!
//! # Formula
//!
//! ```text
//! δ    = (speed_mps · duration_s / 1000) / R        R = 6371 km
//! lat2 = asin( sin lat1 · cos δ + cos lat1 · sin δ · cos θ )
//! lng2 = lng1 + atan2( sin θ · sin δ · cos lat1, cos δ − sin lat1 · sin lat2 )
//! ```
//!
//! Angles are radians internally; inputs and outputs are degrees.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use skytrack::geo::{project, ESTIMATE_HORIZON};
//!
//! // 250 m/s heading north-east for one hour
//! let dest = project(23.0, 80.0, Some(45.0), Some(250.0), ESTIMATE_HORIZON).unwrap();
//! assert!(dest.latitude > 23.0 && dest.longitude > 80.0);
//!
//! // Too slow to project
//! assert!(project(23.0, 80.0, Some(45.0), Some(5.0), Duration::from_secs(1)).is_none());
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ground speeds below this (m/s) are treated as stationary or noisy.
pub const MIN_PROJECTION_SPEED_MPS: f64 = 10.0;

/// Look-ahead used for a flight's estimated destination.
pub const ESTIMATE_HORIZON: Duration = Duration::from_secs(3600);

/// Compass rose used by [`compass_point`], clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both coordinates are finite and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Project a position forward along a great circle.
///
/// Returns `None` when heading or speed is missing, when speed is below
/// [`MIN_PROJECTION_SPEED_MPS`], or when any input is not finite. Abstaining
/// is a normal outcome for slow or heading-less aircraft, not an error.
///
/// The resulting longitude is wrapped into `[-180, 180]`.
///
/// # Arguments
///
/// * `latitude`, `longitude` - Start position in degrees
/// * `heading_deg` - Bearing of travel, degrees clockwise from north
/// * `speed_mps` - Ground speed in metres per second
/// * `duration` - How far ahead to project
pub fn project(
    latitude: f64,
    longitude: f64,
    heading_deg: Option<f64>,
    speed_mps: Option<f64>,
    duration: Duration,
) -> Option<GeoPoint> {
    let heading = heading_deg?;
    let speed = speed_mps?;

    if !(latitude.is_finite() && longitude.is_finite() && heading.is_finite() && speed.is_finite())
    {
        return None;
    }
    if speed < MIN_PROJECTION_SPEED_MPS {
        return None;
    }

    let distance_km = speed * duration.as_secs_f64() / 1000.0;
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = heading.to_radians();

    let lat1 = latitude.to_radians();
    let lng1 = longitude.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Some(GeoPoint::new(
        lat2.to_degrees(),
        wrap_longitude(lng2.to_degrees()),
    ))
}

/// Wrap a longitude into `[-180, 180]`.
///
/// Values already in range are returned unchanged, so `180.0` stays `180.0`.
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Normalize a heading into `[0, 360)`.
pub fn normalize_heading(heading_deg: f64) -> f64 {
    heading_deg.rem_euclid(360.0)
}

/// 16-point compass label for a heading, or `"Unknown"` when absent.
pub fn compass_point(heading_deg: Option<f64>) -> &'static str {
    match heading_deg {
        Some(h) if h.is_finite() => {
            let index = (normalize_heading(h) / 22.5).round() as usize % COMPASS_POINTS.len();
            COMPASS_POINTS[index]
        }
        _ => "Unknown",
    }
}
