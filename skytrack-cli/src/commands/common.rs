//! Common formatting shared across CLI commands.

use chrono::{DateTime, Local};
use console::style;
use skytrack::flight::FlightRecord;
use skytrack::geo::GeoPoint;

use crate::error::CliError;

/// Placeholder for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Column headers of the flight table.
const HEADERS: [&str; 9] = [
    "CALLSIGN", "COUNTRY", "LAT", "LNG", "ALT", "SPEED", "HEADING", "SEEN", "EST. +1H",
];

/// Render flights as an aligned text table.
pub fn flight_table(flights: &[FlightRecord]) -> String {
    let rows: Vec<[String; 9]> = flights.iter().map(flight_row).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect();
    out.push_str(&style(header.join("  ").trim_end()).bold().to_string());
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn flight_row(flight: &FlightRecord) -> [String; 9] {
    [
        flight.callsign.clone(),
        flight.origin_country.clone(),
        format!("{:.2}", flight.latitude),
        format!("{:.2}", flight.longitude),
        format_altitude(flight.altitude_m),
        format_speed(flight.ground_speed_mps),
        format_heading(flight.heading_deg),
        format_seen(flight.timestamp_ms),
        format_estimate(flight.estimated_destination),
    ]
}

/// Altitude in metres with thousands separators.
pub fn format_altitude(altitude_m: Option<f64>) -> String {
    match altitude_m {
        Some(alt) => format!("{} m", group_thousands(alt.round() as i64)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Ground speed in m/s.
pub fn format_speed(speed_mps: Option<f64>) -> String {
    match speed_mps {
        Some(speed) => format!("{:.1} m/s", speed),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Heading in degrees with its compass point.
pub fn format_heading(heading_deg: Option<f64>) -> String {
    match heading_deg {
        Some(h) => format!("{:.1}° ({})", h, skytrack::geo::compass_point(Some(h))),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Local wall-clock time of a report.
pub fn format_seen(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Estimated position or a dash when the aircraft is not projectable.
pub fn format_estimate(estimate: Option<GeoPoint>) -> String {
    match estimate {
        Some(p) => format!("{:.2}, {:.2}", p.latitude, p.longitude),
        None => "-".to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a yellow notice line.
pub fn print_notice(notice: &str) {
    println!("{} {}", style("!").yellow().bold(), style(notice).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight() -> FlightRecord {
        FlightRecord {
            id: "abc".to_string(),
            callsign: "AIC101".to_string(),
            origin_country: "India".to_string(),
            latitude: 20.123,
            longitude: 80.456,
            altitude_m: Some(10_668.0),
            ground_speed_mps: Some(250.04),
            vertical_rate_mps: None,
            heading_deg: Some(91.0),
            timestamp_ms: 1_700_000_000_000,
            squawk: "1234".to_string(),
            on_ground: false,
            estimated_destination: Some(GeoPoint::new(20.1, 88.0)),
        }
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_altitude(Some(10_668.0)), "10,668 m");
        assert_eq!(format_altitude(Some(950.4)), "950 m");
        assert_eq!(format_altitude(None), "N/A");
        assert_eq!(format_speed(Some(250.04)), "250.0 m/s");
        assert_eq!(format_heading(Some(91.0)), "91.0° (E)");
        assert_eq!(format_heading(None), "N/A");
        assert_eq!(format_estimate(None), "-");
        assert_eq!(format_estimate(Some(GeoPoint::new(1.0, 2.5))), "1.00, 2.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-12_000), "-12,000");
    }

    #[test]
    fn test_flight_table() {
        console::set_colors_enabled(false);
        let table = flight_table(&[flight()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("CALLSIGN"));
        assert!(lines[1].starts_with("AIC101"));
        assert!(lines[1].contains("20.12"));
        assert!(lines[1].contains("10,668 m"));
        assert!(lines[1].contains("(E)"));
        assert!(lines[1].ends_with("20.10, 88.00"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        console::set_colors_enabled(false);
        assert_eq!(flight_table(&[]).lines().count(), 1);
    }
}
