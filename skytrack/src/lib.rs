//! SkyTrack - live flight positions with dead-reckoning animation
//!
//! This library turns raw aircraft telemetry into validated, region-filtered
//! flight records, estimates where each aircraft will be in an hour, and
//! keeps positions moving between network refreshes by projecting them
//! forward once per second.
//!
//! # Modules
//!
//! - [`geo`]: great-circle projection shared by estimation and animation
//! - [`region`]: built-in region table and bounding boxes
//! - [`flight`]: flight records and immutable snapshots
//! - [`normalize`]: telemetry payload to flight records
//! - [`sample`]: synthetic fleet used when live data is unavailable
//! - [`animation`]: Idle/Running scheduler and its async driver
//! - [`source`]: HTTP telemetry source
//! - [`feed`]: periodic refresh with sample fallback
//! - [`config`], [`logging`], [`app`]: configuration file, logging setup,
//!   and application bootstrap

pub mod animation;
pub mod app;
pub mod config;
pub mod feed;
pub mod flight;
pub mod geo;
pub mod logging;
pub mod normalize;
pub mod region;
pub mod sample;
pub mod source;
