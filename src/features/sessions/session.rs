//! Workout session records.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::routine::{normalize_routines, Routine};
use crate::features::timer::DurationParts;

/// A recorded workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Stable identifier, assigned at creation.
    pub id: Uuid,
    /// When the workout happened.
    pub date: DateTime<Utc>,
    /// Length in seconds.
    pub duration: u64,
    /// Routines trained, sorted and unique.
    pub routines: Vec<Routine>,
    /// Whether protein powder was taken afterwards.
    #[serde(rename = "atePowder", default)]
    pub ate_powder: bool,
}

impl WorkoutSession {
    /// Create a session stamped with the current time.
    #[must_use]
    pub fn new(duration: u64, routines: impl IntoIterator<Item = Routine>) -> Self {
        Self::at(Utc::now(), duration, routines, false)
    }

    /// Create a session at an explicit instant, as for manual entries.
    #[must_use]
    pub fn at(
        date: DateTime<Utc>,
        duration: u64,
        routines: impl IntoIterator<Item = Routine>,
        ate_powder: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            duration,
            routines: normalize_routines(routines),
            ate_powder,
        }
    }

    /// Get the session date in the local timezone.
    #[must_use]
    pub fn date_local(&self) -> DateTime<Local> {
        self.date.with_timezone(&Local)
    }

    /// The calendar day this session falls on in `tz`.
    #[must_use]
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }

    /// Split the duration into clock parts.
    #[must_use]
    pub const fn duration_parts(&self) -> DurationParts {
        DurationParts::from_seconds(self.duration)
    }

    /// First eight characters of the id, enough to address it on the command line.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_new_normalizes_routines() {
        let session = WorkoutSession::new(125, [Routine::Legs, Routine::Back, Routine::Legs]);

        assert_eq!(session.duration, 125);
        assert_eq!(session.routines, vec![Routine::Back, Routine::Legs]);
        assert!(!session.ate_powder);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = WorkoutSession::new(1, []);
        let b = WorkoutSession::new(1, []);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_field_names() {
        let session = WorkoutSession::new(60, [Routine::Chest]);
        let value = serde_json::to_value(&session).unwrap();

        assert!(value.get("id").is_some());
        assert!(value.get("date").is_some());
        assert_eq!(value["duration"], 60);
        assert_eq!(value["routines"][0], "Chest");
        assert_eq!(value["atePowder"], false);
    }

    #[test]
    fn test_day_in_timezone() {
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 23, 30, 0).unwrap();
        let session = WorkoutSession::at(date, 60, [], false);

        let utc_day = session.day_in(&Utc);
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let east_day = session.day_in(&east);

        assert_eq!(utc_day, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(east_day, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn test_short_id() {
        let session = WorkoutSession::new(1, []);
        assert_eq!(session.short_id().len(), 8);
        assert!(session.id.to_string().starts_with(&session.short_id()));
    }
}
