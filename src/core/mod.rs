//! Core abstractions for bigtimer.
//!
//! This module provides shared traits and utilities used across features.

mod clock;
mod datetime;
mod traits;

pub use clock::{ManualClock, SystemClock};
pub use datetime::{parse_day, parse_month, parse_time_of_day};
pub use traits::{Clock, KeyValueStore};
