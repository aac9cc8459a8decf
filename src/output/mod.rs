//! Output formatting for bigtimer.
//!
//! Every command renders through here, either as colored text or as JSON.

mod json;
mod pretty;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::BigTimerError;
use crate::features::history::MonthView;
use crate::features::sessions::{Routine, WorkoutSession};
use crate::features::timer::{ElapsedTracker, TimerState};

pub use json::*;
pub use pretty::*;

/// Snapshot of the stopwatch for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatus {
    pub state: TimerState,
    pub elapsed_seconds: u64,
    pub routines: Vec<Routine>,
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerStatus {
    /// Capture the current state of `tracker`.
    #[must_use]
    pub fn of(tracker: &ElapsedTracker) -> Self {
        Self {
            state: tracker.state(),
            elapsed_seconds: tracker.elapsed(),
            routines: tracker.selected_routines(),
            started_at: tracker.start_instant(),
        }
    }
}

/// Format the stopwatch status based on output format
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_status(status: &TimerStatus, format: OutputFormat) -> Result<String, BigTimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(status)),
        OutputFormat::Json => to_json(status),
    }
}

/// Format a day of sessions based on output format
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[&WorkoutSession],
    day: NaiveDate,
    title: &str,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions, title)),
        OutputFormat::Json => format_sessions_json(sessions, day),
    }
}

/// Format a single session based on output format
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_session(session: &WorkoutSession, format: OutputFormat) -> Result<String, BigTimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session)),
        OutputFormat::Json => to_json(session),
    }
}

/// Format a month calendar based on output format
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_calendar(view: &MonthView, format: OutputFormat) -> Result<String, BigTimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_calendar_pretty(view)),
        OutputFormat::Json => format_calendar_json(view),
    }
}
