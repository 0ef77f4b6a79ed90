//! Telemetry payload normalization.
//!
//! Turns an OpenSky-style `states/all` payload into validated
//! [`FlightRecord`]s for one region. Each entry of `states` is a positional
//! array:
//!
//! | index | field            | used as                         |
//! |-------|------------------|---------------------------------|
//! | 0     | icao24           | `id`                            |
//! | 1     | callsign         | `callsign` (trimmed)            |
//! | 2     | origin country   | `origin_country`                |
//! | 4     | last contact (s) | `timestamp_ms`, `squawk`        |
//! | 5     | longitude        | `longitude`                     |
//! | 6     | latitude         | `latitude`                      |
//! | 7     | altitude (m)     | `altitude_m`                    |
//! | 8     | on ground        | `on_ground`                     |
//! | 9     | velocity (m/s)   | `ground_speed_mps`              |
//! | 10    | true track (deg) | `heading_deg`                   |
//! | 11    | vertical rate    | `vertical_rate_mps`             |
//!
//! Invalid or out-of-region entries are dropped silently; only a payload
//! without a `states` list is an error.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::flight::{FlightRecord, UNKNOWN};
use crate::geo::{self, ESTIMATE_HORIZON};
use crate::region::Region;

const IDX_ID: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_COUNTRY: usize = 2;
const IDX_LAST_CONTACT: usize = 4;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_ALTITUDE: usize = 7;
const IDX_ON_GROUND: usize = 8;
const IDX_VELOCITY: usize = 9;
const IDX_TRUE_TRACK: usize = 10;
const IDX_VERTICAL_RATE: usize = 11;

/// The payload does not have the expected top-level shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataFormatError {
    /// Payload is not a JSON object.
    #[error("telemetry payload is not a JSON object")]
    NotAnObject,

    /// Payload has no `states` field.
    #[error("telemetry payload has no states list")]
    MissingStates,

    /// `states` is present but is not an array (includes `null`).
    #[error("telemetry states field is not a list (found {0})")]
    StatesNotList(&'static str),
}

/// Normalize a telemetry payload into flight records inside `region`.
///
/// Entries keep their upstream order and are not deduplicated. Either the
/// whole list is returned or an error; never a partial list.
///
/// # Errors
///
/// Returns [`DataFormatError`] when `states` is missing or not an array.
pub fn normalize(payload: &Value, region: &Region) -> Result<Vec<FlightRecord>, DataFormatError> {
    let object = payload.as_object().ok_or(DataFormatError::NotAnObject)?;
    let states = match object.get("states") {
        None => return Err(DataFormatError::MissingStates),
        Some(Value::Array(states)) => states,
        Some(other) => return Err(DataFormatError::StatesNotList(json_kind(other))),
    };

    let flights: Vec<FlightRecord> = states
        .iter()
        .filter_map(|entry| entry.as_array())
        .filter_map(|fields| normalize_entry(fields, region))
        .collect();

    info!(
        region = %region.key,
        total = states.len(),
        kept = flights.len(),
        "Normalized telemetry"
    );

    Ok(flights)
}

/// Validate and map a single state vector. `None` drops the entry.
fn normalize_entry(fields: &[Value], region: &Region) -> Option<FlightRecord> {
    let callsign = field(fields, IDX_CALLSIGN)?;
    let last_contact = field(fields, IDX_LAST_CONTACT)?;
    let longitude = field(fields, IDX_LONGITUDE)?.as_f64()?;
    let latitude = field(fields, IDX_LATITUDE)?.as_f64()?;

    if latitude == 0.0 && longitude == 0.0 {
        return None;
    }
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    if !region.bounds.contains(latitude, longitude) {
        return None;
    }

    let Some(contact_secs) = last_contact.as_f64() else {
        debug!(entry = ?fields.get(IDX_ID), "Dropping entry with non-numeric timestamp");
        return None;
    };

    let callsign = match render(callsign).trim() {
        "" => UNKNOWN.to_string(),
        trimmed => trimmed.to_string(),
    };
    let origin_country = field(fields, IDX_COUNTRY)
        .map(render)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let heading_deg = number(fields, IDX_TRUE_TRACK);
    let ground_speed_mps = number(fields, IDX_VELOCITY);

    Some(FlightRecord {
        id: field(fields, IDX_ID).map(render).unwrap_or_default(),
        callsign,
        origin_country,
        latitude,
        longitude,
        altitude_m: number(fields, IDX_ALTITUDE),
        ground_speed_mps,
        vertical_rate_mps: number(fields, IDX_VERTICAL_RATE),
        heading_deg,
        timestamp_ms: (contact_secs * 1000.0).round() as i64,
        squawk: render(last_contact),
        on_ground: field(fields, IDX_ON_GROUND)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        estimated_destination: geo::project(
            latitude,
            longitude,
            heading_deg,
            ground_speed_mps,
            ESTIMATE_HORIZON,
        ),
    })
}

/// Non-null field at `index`.
fn field(fields: &[Value], index: usize) -> Option<&Value> {
    fields.get(index).filter(|v| !v.is_null())
}

/// Finite numeric field at `index`.
fn number(fields: &[Value], index: usize) -> Option<f64> {
    field(fields, index)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// Strings verbatim, anything else via its JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
