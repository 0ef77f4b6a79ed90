//! Normalize command - validate a saved telemetry payload.

use std::path::{Path, PathBuf};

use skytrack::flight::FlightRecord;
use skytrack::normalize::normalize;
use skytrack::region::Region;

use super::common::{flight_table, print_json};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the normalize command.
pub struct NormalizeArgs {
    pub file: PathBuf,
    pub region: Option<String>,
    pub json: bool,
}

/// Run the normalize command.
pub fn run(args: NormalizeArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("normalize");

    let config = runner.app_config(args.region.as_deref())?;
    let region = config.region();
    let flights = normalize_file(&args.file, region)?;

    if args.json {
        return print_json(&flights);
    }

    println!(
        "{} valid flights in {} from {}",
        flights.len(),
        region,
        args.file.display()
    );
    println!();
    print!("{}", flight_table(&flights));
    Ok(())
}

/// Read, parse and normalize a payload file.
fn normalize_file(path: &Path, region: &Region) -> Result<Vec<FlightRecord>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: serde_json::Value = serde_json::from_str(&text)?;
    Ok(normalize(&payload, region)?)
}
