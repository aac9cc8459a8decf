//! The workout stopwatch and its live surface.

mod activity;
mod format;
mod ticker;
mod tracker;

pub use activity::{
    ActivityCommand, ActivityContent, ActivitySender, ActivityWorker, LiveActivity, NoopActivity,
    TerminalActivity,
};
pub use format::{
    format_clock, format_clock_compact, format_dial, format_duration, parse_duration,
    DurationParts,
};
pub use ticker::run_ticker;
pub use tracker::{ElapsedTracker, TimerState};
