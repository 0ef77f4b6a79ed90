//! Watch command - live, animated flight table for a region.

use chrono::Local;
use console::{style, Term};
use skytrack::app::{AppConfig, SkyTrackApp};
use skytrack::feed::{DataOrigin, FeedUpdate};
use skytrack::flight::{filter_flights, FlightRecord};
use skytrack::region::Region;
use tracing::info;

use super::common::{flight_table, print_notice};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the watch command.
pub struct WatchArgs {
    pub region: Option<String>,
    pub search: Option<String>,
    pub offline: bool,
    pub ticks: Option<u64>,
    pub json: bool,
}

/// Run the watch command.
pub fn run(args: WatchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("watch");

    let config = runner
        .app_config(args.region.as_deref())?
        .with_offline(args.offline);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to create Tokio runtime: {}", e)))?;

    runtime.block_on(watch(config, args))
}

async fn watch(config: AppConfig, args: WatchArgs) -> Result<(), CliError> {
    let region = config.region().clone();
    let app = SkyTrackApp::start(config)?;

    let cancellation = app.cancellation_token();
    let handler_token = cancellation.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .map_err(|e| CliError::Runtime(format!("Failed to set signal handler: {}", e)))?;

    let mut animated = app.animated();
    let updates = app.updates();
    let term = Term::stdout();
    let search = args.search.as_deref().unwrap_or("");
    let mut frames: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = cancellation.cancelled() => break,

            changed = animated.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = animated.borrow_and_update().clone();
                let update = updates.borrow().clone();
                // nothing fetched yet
                let Some(update) = update else { continue };

                let visible = filter_flights(&snapshot, search);
                if args.json {
                    println!("{}", serde_json::to_string(&visible)?);
                } else {
                    render_frame(&term, &region, &update, &visible, snapshot.len());
                }

                frames += 1;
                if args.ticks.is_some_and(|limit| frames >= limit) {
                    break;
                }
            }
        }
    }

    let status = app.status();
    app.shutdown().await;
    info!(frames, refreshes = status.refreshes, "Watch finished");

    if !args.json {
        println!();
        println!("Session Summary");
        println!("───────────────");
        println!("  Frames shown:   {}", frames);
        println!(
            "  Refreshes:      {} ({} live, {} sample)",
            status.refreshes, status.live, status.fallbacks
        );
        if let Some(error) = status.last_error {
            println!("  Last error:     {}", error);
        }
    }
    Ok(())
}

fn render_frame(
    term: &Term,
    region: &Region,
    update: &FeedUpdate,
    visible: &[FlightRecord],
    total: usize,
) {
    if term.is_term() {
        // a failed clear only leaves the previous frame on screen
        let _ = term.clear_screen();
    }
    println!("{}", frame_header(region, update, visible.len(), total));
    if let Some(notice) = &update.notice {
        print_notice(notice);
    }
    println!();
    print!("{}", flight_table(visible));
    println!();
    println!("{}", style("Press Ctrl+C to exit").dim());
}

/// One-line summary above the table.
fn frame_header(region: &Region, update: &FeedUpdate, shown: usize, total: usize) -> String {
    let origin = match update.origin {
        DataOrigin::Live => style("live").green(),
        DataOrigin::Sample => style("sample").yellow(),
    };
    let fetched = update.fetched_at.with_timezone(&Local).format("%H:%M:%S");
    let count = if shown == total {
        format!("{} flights", total)
    } else {
        format!("{} of {} flights", shown, total)
    };
    format!(
        "{} {} | {} | {} data, refreshed {}",
        style("SkyTrack").bold().cyan(),
        region.name,
        count,
        origin,
        fetched
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skytrack::region::RegionTable;
    use std::sync::Arc;

    fn update(origin: DataOrigin) -> FeedUpdate {
        FeedUpdate {
            flights: Arc::from(Vec::new()),
            origin,
            notice: None,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_frame_header() {
        console::set_colors_enabled(false);
        let regions = RegionTable::builtin();
        let uk = regions.get("uk").unwrap();

        let header = frame_header(uk, &update(DataOrigin::Live), 12, 12);
        assert!(header.starts_with("SkyTrack United Kingdom | 12 flights | live data"));

        let header = frame_header(uk, &update(DataOrigin::Sample), 3, 8);
        assert!(header.contains("3 of 8 flights"));
        assert!(header.contains("sample data"));
    }
}
