//! bigtimer - a workout stopwatch and training log
//!
//! The library holds the stopwatch, the session store and their persistence.
//! The `bigtimer` binary is a thin command-line front end over it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BigTimerError;
pub use features::sessions::{Routine, SessionStore, WorkoutSession};
pub use features::timer::{ElapsedTracker, TimerState};
