//! Sample command - print the synthetic demonstration fleet.

use skytrack::sample::SampleDataSynthesizer;

use super::common::{flight_table, print_json};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the sample command.
pub struct SampleArgs {
    pub region: Option<String>,
    pub seed: Option<u64>,
    pub json: bool,
}

/// Run the sample command.
pub fn run(args: SampleArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("sample");

    let config = runner.app_config(args.region.as_deref())?;
    let seed = args.seed.or(config.feed.sample_seed);
    let region = config.region();

    let flights = SampleDataSynthesizer::with_optional_seed(seed).synthesize(region);

    if args.json {
        return print_json(&flights);
    }

    println!("Sample fleet for {}", region);
    println!();
    print!("{}", flight_table(&flights));
    Ok(())
}
