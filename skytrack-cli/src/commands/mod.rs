//! CLI command implementations.

pub mod common;
pub mod config;
pub mod normalize;
pub mod project;
pub mod regions;
pub mod sample;
pub mod watch;
