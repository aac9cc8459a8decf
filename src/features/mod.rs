//! Feature implementations for bigtimer.
//!
//! - Workout sessions and their store
//! - The elapsed-time stopwatch and its live surface
//! - History browsing and manual entries

pub mod history;
pub mod sessions;
pub mod timer;
