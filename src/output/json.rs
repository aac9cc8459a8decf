//! JSON output formatting.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::error::BigTimerError;
use crate::features::history::MonthView;
use crate::features::sessions::WorkoutSession;

/// Format a day of sessions as JSON
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_sessions_json(
    sessions: &[&WorkoutSession],
    day: NaiveDate,
) -> Result<String, BigTimerError> {
    let total: u64 = sessions.iter().map(|s| s.duration).sum();
    let output = json!({
        "day": day,
        "count": sessions.len(),
        "totalSeconds": total,
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a month calendar as JSON, listing only days with workouts
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn format_calendar_json(view: &MonthView) -> Result<String, BigTimerError> {
    let active: Vec<_> = view
        .cells
        .iter()
        .flatten()
        .filter(|cell| cell.has_sessions)
        .collect();

    let output = json!({
        "month": format!("{}-{:02}", view.year, view.month),
        "activeDays": active.len(),
        "days": active
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `BigTimerError::Serialization` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, BigTimerError> {
    Ok(serde_json::to_string_pretty(value)?)
}
