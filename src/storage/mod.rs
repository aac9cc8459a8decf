//! Storage layer for bigtimer.
//!
//! Everything persisted lives in a flat key-value blob store:
//! - `workoutSessions` - the full session list as JSON
//! - `timerStartTime` - the stopwatch start instant, only while running
//! - `selectedRoutines` - the pending routine selection
//! - `pausedElapsedSeconds` - elapsed seconds of a paused stopwatch

mod database;
mod memory;
mod migrations;

pub use database::Database;
pub use memory::MemoryStore;

/// Key holding the serialized session list.
pub const SESSIONS_KEY: &str = "workoutSessions";
/// Key holding the stopwatch start instant.
pub const START_TIME_KEY: &str = "timerStartTime";
/// Key holding the pending routine selection.
pub const SELECTED_ROUTINES_KEY: &str = "selectedRoutines";
/// Key holding the elapsed seconds of a paused stopwatch.
pub const PAUSED_ELAPSED_KEY: &str = "pausedElapsedSeconds";
