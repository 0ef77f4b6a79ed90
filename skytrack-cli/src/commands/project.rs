//! Project command - one-off dead-reckoning calculation.

use std::time::Duration;

use skytrack::geo::{self, GeoPoint};

use crate::error::CliError;

/// Arguments for the project command.
pub struct ProjectArgs {
    pub lat: f64,
    pub lng: f64,
    pub heading: f64,
    pub speed: f64,
    pub seconds: u64,
}

/// Run the project command.
pub fn run(args: ProjectArgs) -> Result<(), CliError> {
    let start = GeoPoint::new(args.lat, args.lng);
    if !start.is_valid() {
        return Err(CliError::InvalidArgument(format!(
            "Start position {} is outside latitude -90..90 / longitude -180..180",
            start
        )));
    }

    println!("{}", describe(start, args.heading, args.speed, args.seconds));
    Ok(())
}

fn describe(start: GeoPoint, heading: f64, speed: f64, seconds: u64) -> String {
    let duration = Duration::from_secs(seconds);
    match geo::project(
        start.latitude,
        start.longitude,
        Some(heading),
        Some(speed),
        duration,
    ) {
        Some(end) => format!(
            "{} heading {:.1}° ({}) at {:.1} m/s for {} s -> {}",
            start,
            heading,
            geo::compass_point(Some(heading)),
            speed,
            seconds,
            end
        ),
        None if !heading.is_finite() || !speed.is_finite() => format!(
            "No estimate: heading ({}) and speed ({}) must be finite numbers",
            heading, speed
        ),
        None => format!(
            "No estimate: speed {:.1} m/s is below {} m/s",
            speed,
            geo::MIN_PROJECTION_SPEED_MPS
        ),
    }
}
