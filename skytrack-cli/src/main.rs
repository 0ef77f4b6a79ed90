//! SkyTrack CLI - live aircraft positions in the terminal.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;

use commands::config::ConfigCommands;
use commands::normalize::NormalizeArgs;
use commands::project::ProjectArgs;
use commands::sample::SampleArgs;
use commands::watch::WatchArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "skytrack")]
#[command(version, about = "Live aircraft positions with dead-reckoning animation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show live flights for a region, animated between refreshes
    Watch {
        /// Region key (see `skytrack regions`); defaults to feed.region
        #[arg(short, long)]
        region: Option<String>,

        /// Only show flights whose callsign or country contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Do not contact the network; show sample data
        #[arg(long)]
        offline: bool,

        /// Exit after this many frames
        #[arg(long)]
        ticks: Option<u64>,

        /// Print one JSON array per frame instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the synthetic demonstration fleet
    Sample {
        /// Region key; defaults to feed.region
        #[arg(short, long)]
        region: Option<String>,

        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a saved states/all payload against a region
    Normalize {
        /// Path to the JSON payload
        file: PathBuf,

        /// Region key; defaults to feed.region
        #[arg(short, long)]
        region: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Project a position along a heading
    Project {
        /// Start latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Start longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Heading in degrees clockwise from north
        #[arg(long)]
        heading: f64,

        /// Ground speed in m/s
        #[arg(long)]
        speed: f64,

        /// Seconds to project ahead
        #[arg(long, default_value_t = 3600)]
        seconds: u64,
    },

    /// List the built-in regions
    Regions,

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Watch {
            region,
            search,
            offline,
            ticks,
            json,
        } => commands::watch::run(WatchArgs {
            region,
            search,
            offline,
            ticks,
            json,
        }),
        Commands::Sample { region, seed, json } => {
            commands::sample::run(SampleArgs { region, seed, json })
        }
        Commands::Normalize { file, region, json } => {
            commands::normalize::run(NormalizeArgs { file, region, json })
        }
        Commands::Project {
            lat,
            lng,
            heading,
            speed,
            seconds,
        } => commands::project::run(ProjectArgs {
            lat,
            lng,
            heading,
            speed,
            seconds,
        }),
        Commands::Regions => {
            commands::regions::run();
            Ok(())
        }
        Commands::Config { command } => commands::config::run(command),
    }
}
