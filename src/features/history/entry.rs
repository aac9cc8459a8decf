//! Manual workout entries and edits.

use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

use crate::features::sessions::{Routine, SessionStore, WorkoutSession};
use crate::features::timer::DurationParts;

/// A workout logged after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub day: NaiveDate,
    pub time: NaiveTime,
    pub duration: DurationParts,
    pub routines: Vec<Routine>,
    pub ate_powder: bool,
}

impl ManualEntry {
    /// Turn the entry into a session dated `day` at `time` in `tz`.
    ///
    /// Returns `None` for a zero or overflowing duration, or when the
    /// wall-clock time does not exist in `tz` (skipped by a daylight-saving
    /// change). Seconds on `time` are dropped.
    #[must_use]
    pub fn into_session<Tz: TimeZone>(self, tz: &Tz) -> Option<WorkoutSession> {
        let total = self.duration.total_seconds().filter(|&total| total > 0)?;

        let time = self.time.with_second(0)?.with_nanosecond(0)?;
        let local = tz.from_local_datetime(&self.day.and_time(time)).earliest()?;

        Some(WorkoutSession::at(
            local.with_timezone(&Utc),
            total,
            self.routines,
            self.ate_powder,
        ))
    }
}

/// New duration and routines for an existing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEdit {
    pub duration: DurationParts,
    pub routines: Vec<Routine>,
}

impl SessionEdit {
    /// Start an edit from the current values of `session`.
    #[must_use]
    pub fn from_session(session: &WorkoutSession) -> Self {
        Self {
            duration: session.duration_parts(),
            routines: session.routines.clone(),
        }
    }

    /// Apply to the session with `id`.
    ///
    /// Returns `false` if it does not exist or the duration overflows.
    pub fn apply(self, store: &mut SessionStore, id: uuid::Uuid) -> bool {
        let Some(duration) = self.duration.total_seconds() else {
            return false;
        };
        store.update(id, duration, self.routines)
    }
}
