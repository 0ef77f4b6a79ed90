//! End-to-end tests: payload → records → animation, and the refresh pipeline
//! over a fake HTTP transport.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use skytrack::animation::{AnimationDriver, AnimationScheduler, SchedulerState};
use skytrack::app::{AppConfig, SkyTrackApp};
use skytrack::config::ConfigFile;
use skytrack::feed::{DataOrigin, FeedConfig, FeedRefresher};
use skytrack::flight::{filter_flights, FlightSnapshot};
use skytrack::normalize::normalize;
use skytrack::region::RegionTable;
use skytrack::source::{HttpClient, OpenSkySource, SourceError};

/// Transport returning a fixed body.
struct FixedBody(&'static str);

impl HttpClient for FixedBody {
    fn get_json(&self, _url: &str) -> Result<Vec<u8>, SourceError> {
        Ok(self.0.as_bytes().to_vec())
    }
}

/// Transport that always fails.
struct Down;

impl HttpClient for Down {
    fn get_json(&self, _url: &str) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::Http("connection refused".to_string()))
    }
}

const INDIA_PAYLOAD: &str = r#"{
    "time": 1700000000,
    "states": [
        ["800abc", "AIC101 ", "India", 1700000000, 1700000000, 80.0, 20.0, 10000.0, false, 300.0, 90.0, 0.0],
        ["800def", "IGO22", "India", 1700000000, 1700000000, 77.1, 28.6, 0.0, true, 4.0, 270.0, 0.0],
        ["000000", "ZERO", "Nowhere", 1700000000, 1700000000, 0.0, 0.0, 0.0, false, 250.0, 0.0, 0.0],
        ["3c6444", "DLH123", "Germany", 1700000000, 1700000000, 8.6, 50.0, 11000.0, false, 240.0, 100.0, 0.0]
    ]
}"#;

#[test]
fn test_payload_to_animation() {
    let regions = RegionTable::builtin();
    let india = regions.get("india").unwrap();

    let payload: serde_json::Value = serde_json::from_str(INDIA_PAYLOAD).unwrap();
    let flights = normalize(&payload, india).unwrap();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0].callsign, "AIC101");
    assert!(flights[0].estimated_destination.is_some());
    assert!(flights[1].estimated_destination.is_none());

    let mut scheduler = AnimationScheduler::with_defaults();
    assert_eq!(
        scheduler.install(FlightSnapshot::from(flights.clone())),
        SchedulerState::Running
    );

    scheduler.tick().unwrap();
    let moved = scheduler.tick().unwrap();

    // 300 m/s east for one second at 20°N
    let expected = 0.3 / 6371.0 * 180.0 / std::f64::consts::PI / 20f64.to_radians().cos();
    assert!((moved[0].longitude - 80.0 - expected).abs() < 1e-6);
    assert_eq!(moved[1].longitude, flights[1].longitude);
    assert_eq!(moved[1].latitude, flights[1].latitude);
}

#[test]
fn test_search_over_normalized_flights() {
    let regions = RegionTable::builtin();
    let payload: serde_json::Value = serde_json::from_str(INDIA_PAYLOAD).unwrap();
    let flights = normalize(&payload, regions.get("germany").unwrap()).unwrap();

    assert_eq!(filter_flights(&flights, "dlh").len(), 1);
    assert_eq!(filter_flights(&flights, "germany").len(), 1);
    assert!(filter_flights(&flights, "aic").is_empty());
}

#[tokio::test]
async fn test_refresher_over_http_source() {
    let region = RegionTable::builtin().get("india").unwrap().clone();
    let source = Arc::new(OpenSkySource::new(FixedBody(INDIA_PAYLOAD), "https://example.test/states"));
    let mut refresher = FeedRefresher::new(FeedConfig::new(region), source);

    let update = refresher.refresh_once().await;
    assert_eq!(update.origin, DataOrigin::Live);
    assert_eq!(update.flights.len(), 2);
}

#[tokio::test]
async fn test_refresher_falls_back_when_transport_fails() {
    let region = RegionTable::builtin().get("japan").unwrap().clone();
    let source = Arc::new(OpenSkySource::new(Down, "https://example.test/states"));
    let config = FeedConfig::new(region.clone()).with_sample_seed(Some(4));
    let mut refresher = FeedRefresher::new(config, source);

    let update = refresher.refresh_once().await;
    assert_eq!(update.origin, DataOrigin::Sample);
    assert_eq!(update.flights.len(), 8);
    assert!(update
        .flights
        .iter()
        .all(|f| region.bounds.contains(f.latitude, f.longitude)));
    assert!(update.notice.unwrap().contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_refresher_feeds_driver() {
    let region = RegionTable::builtin().get("india").unwrap().clone();
    let source = Arc::new(OpenSkySource::new(FixedBody(INDIA_PAYLOAD), "https://example.test/states"));
    let refresher = FeedRefresher::new(FeedConfig::new(region), source);

    let cancellation = CancellationToken::new();
    let (flights_tx, flights_rx) = watch::channel(FlightSnapshot::from(Vec::new()));
    let (animated_tx, mut animated_rx) = watch::channel(FlightSnapshot::from(Vec::new()));

    let refresher_task = tokio::spawn(refresher.run(flights_tx, cancellation.clone()));
    let driver_task = AnimationDriver::default().spawn(flights_rx, animated_tx, cancellation.clone());

    let mut published = Vec::new();
    while published.len() < 3 {
        animated_rx.changed().await.unwrap();
        let snapshot = animated_rx.borrow_and_update().clone();
        if !snapshot.is_empty() {
            published.push(snapshot);
        }
    }

    // install, cold tick, first move
    assert_eq!(published[0][0].longitude, 80.0);
    assert_eq!(published[1][0].longitude, 80.0);
    assert!(published[2][0].longitude > 80.0);

    cancellation.cancel();
    refresher_task.await.unwrap();
    driver_task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_app_shutdown_is_prompt() {
    let config = AppConfig::from_config_file(&ConfigFile::default(), RegionTable::builtin())
        .unwrap()
        .with_offline(true)
        .with_region("france")
        .unwrap();

    let app = SkyTrackApp::start(config).unwrap();
    let mut animated = app.animated();
    animated.changed().await.unwrap();

    tokio::time::timeout(Duration::from_secs(1), app.shutdown())
        .await
        .unwrap();
}
