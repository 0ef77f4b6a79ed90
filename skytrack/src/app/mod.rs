//! Application bootstrap and lifecycle management.
//!
//! This module provides the `SkyTrackApp` type which wires the feed
//! refresher to the animation driver and shuts both down together.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          SkyTrackApp                           │
//! │                                                                │
//! │  1. FlightSource (OpenSky or offline)                          │
//! │                                                                │
//! │  2. FeedRefresher ── every 30 s ──► watch<FlightSnapshot>      │
//! │     └── sample fallback + notice    watch<Option<FeedUpdate>>  │
//! │                                                                │
//! │  3. AnimationDriver ── every 1 s ──► watch<FlightSnapshot>     │
//! │                                                                │
//! │  CancellationToken stops 2 and 3                               │
//! └───────────────────────────────────────────────────────────────┘
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::SkyTrackApp;
pub use config::AppConfig;
pub use error::AppError;
