//! Live animation between telemetry refreshes.
//!
//! Network refreshes arrive every 30 seconds; in between, aircraft are moved
//! once per second along their heading using the same projection as the
//! one-hour destination estimate, only with a one-second step.
//!
//! # Architecture
//!
//! ```text
//! FeedRefresher ──watch<FlightSnapshot>──► AnimationDriver ──watch<FlightSnapshot>──► renderer
//!                                           │
//!                                           └── AnimationScheduler
//!                                                 ├── state: Idle | Running
//!                                                 └── previous positions (by id)
//! ```
//!
//! - [`AnimationScheduler`] is the synchronous state machine. It can be
//!   driven by hand, which is how most tests use it.
//! - [`AnimationDriver`] owns a scheduler inside a tokio task and runs the
//!   one-second timer only while there is something to animate.

mod driver;
mod scheduler;

pub use driver::AnimationDriver;
pub use scheduler::{AnimationConfig, AnimationScheduler, SchedulerState, DEFAULT_TICK_INTERVAL};
