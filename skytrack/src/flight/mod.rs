//! Flight records and snapshots.
//!
//! A [`FlightRecord`] is one aircraft as shown to the user. Records are
//! produced in bulk by the normalizer or the sample synthesizer and handed
//! around as a [`FlightSnapshot`]: an immutable, reference-counted slice.
//! Nothing patches a record inside a published snapshot; every change (a
//! refresh or an animation tick) produces a whole new snapshot.

use std::sync::Arc;

use serde::Serialize;

use crate::geo::GeoPoint;

/// An immutable, shareable set of flight records.
pub type FlightSnapshot = Arc<[FlightRecord]>;

/// Fallback for missing callsign text or origin country.
pub const UNKNOWN: &str = "Unknown";

/// A single aircraft, validated and ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Stable identifier (ICAO24 address for live data).
    pub id: String,
    /// Broadcast callsign, trimmed, never empty.
    pub callsign: String,
    /// Country of registration.
    pub origin_country: String,
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Altitude in metres.
    pub altitude_m: Option<f64>,
    /// Ground speed in metres per second.
    pub ground_speed_mps: Option<f64>,
    /// Vertical rate in metres per second.
    pub vertical_rate_mps: Option<f64>,
    /// True track in degrees clockwise from north (0-360).
    pub heading_deg: Option<f64>,
    /// Time of the report, Unix epoch milliseconds.
    pub timestamp_ms: i64,
    /// Transponder code.
    pub squawk: String,
    /// Whether the aircraft reports being on the ground.
    pub on_ground: bool,
    /// One-hour dead-reckoning estimate, `None` for slow or heading-less aircraft.
    pub estimated_destination: Option<GeoPoint>,
}

impl FlightRecord {
    /// Current position.
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Copy of this record placed at a different position.
    ///
    /// Every field other than latitude/longitude is carried over unchanged.
    pub fn moved_to(&self, position: GeoPoint) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            ..self.clone()
        }
    }

    /// Case-insensitive match on callsign or origin country.
    ///
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.callsign.to_lowercase().contains(&term)
            || self.origin_country.to_lowercase().contains(&term)
    }
}

/// Records whose callsign or origin country contains `term`, in input order.
pub fn filter_flights(flights: &[FlightRecord], term: &str) -> Vec<FlightRecord> {
    flights.iter().filter(|f| f.matches(term)).cloned().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A valid airborne record for tests.
    pub(crate) fn record(id: &str, callsign: &str, speed: Option<f64>) -> FlightRecord {
        FlightRecord {
            id: id.to_string(),
            callsign: callsign.to_string(),
            origin_country: "India".to_string(),
            latitude: 20.0,
            longitude: 80.0,
            altitude_m: Some(11_000.0),
            ground_speed_mps: speed,
            vertical_rate_mps: Some(0.0),
            heading_deg: Some(90.0),
            timestamp_ms: 1_000_000,
            squawk: "1234".to_string(),
            on_ground: false,
            estimated_destination: None,
        }
    }

    #[test]
    fn test_moved_to_only_changes_position() {
        let original = record("abc123", "AI101", Some(250.0));
        let moved = original.moved_to(GeoPoint::new(21.0, 81.5));

        assert_eq!(moved.latitude, 21.0);
        assert_eq!(moved.longitude, 81.5);
        assert_eq!(moved.id, original.id);
        assert_eq!(moved.altitude_m, original.altitude_m);
        assert_eq!(moved.heading_deg, original.heading_deg);
        assert_eq!(moved.estimated_destination, original.estimated_destination);
    }

    #[test]
    fn test_matches_callsign_and_country() {
        let r = record("a", "AI101", Some(250.0));
        assert!(r.matches("ai1"));
        assert!(r.matches("IND"));
        assert!(r.matches(""));
        assert!(r.matches("   "));
        assert!(!r.matches("lufthansa"));
    }

    #[test]
    fn test_filter_flights_keeps_order() {
        let flights = vec![
            record("1", "AI101", None),
            record("2", "LH400", None),
            record("3", "AI202", None),
        ];
        let mut lh = flights[1].clone();
        lh.origin_country = "Germany".to_string();
        let flights = vec![flights[0].clone(), lh, flights[2].clone()];

        let hits = filter_flights(&flights, "ai");
        let ids: Vec<&str> = hits.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(filter_flights(&flights, "germ").len(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(record("a", "AI101", Some(250.0))).unwrap();
        assert_eq!(json["callsign"], "AI101");
        assert_eq!(json["originCountry"], "India");
        assert_eq!(json["groundSpeedMps"], 250.0);
        assert!(json["estimatedDestination"].is_null());
    }
}
