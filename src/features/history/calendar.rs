//! Month calendar with workout markers.

use chrono::{Datelike, Months, NaiveDate, TimeZone};
use serde::Serialize;

use crate::features::sessions::{normalize_routines, Routine, SessionStore, WorkoutSession};

/// Days of `month`, preceded by blanks so the first week starts on Sunday.
///
/// An invalid month yields an empty grid.
#[must_use]
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells = vec![None; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|day| day.month() == month)
            .map(Some),
    );
    cells
}

/// First day of the month `delta` months away from the month of `date`.
#[must_use]
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    let months = Months::new(delta.unsigned_abs());

    if delta < 0 {
        first.checked_sub_months(months)
    } else {
        first.checked_add_months(months)
    }
}

/// Every routine trained across `sessions`, sorted and unique.
#[must_use]
pub fn day_routines(sessions: &[&WorkoutSession]) -> Vec<Routine> {
    normalize_routines(sessions.iter().flat_map(|s| s.routines.iter().copied()))
}

/// One day in a [`MonthView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub has_sessions: bool,
    pub routines: Vec<Routine>,
}

/// A month of day cells, ready to lay out in Sunday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthView {
    /// Build the view for `year`/`month` with days taken in `tz`.
    #[must_use]
    pub fn build<Tz: TimeZone>(store: &SessionStore, year: i32, month: u32, tz: &Tz) -> Self {
        let active = store.days_with_sessions_in(tz);
        let cells = month_grid(year, month)
            .into_iter()
            .map(|slot| {
                slot.map(|date| {
                    let has_sessions = active.contains(&date);
                    let routines = if has_sessions {
                        day_routines(&store.sessions_for_day_in(date, tz))
                    } else {
                        Vec::new()
                    };
                    DayCell {
                        date,
                        has_sessions,
                        routines,
                    }
                })
            })
            .collect();

        Self { year, month, cells }
    }

    /// Header text such as "October 2026".
    #[must_use]
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).map_or_else(
            || format!("{}-{:02}", self.year, self.month),
            |first| first.format("%B %Y").to_string(),
        )
    }

    /// Cells split into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }

    /// Number of days with at least one workout.
    #[must_use]
    pub fn active_days(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.has_sessions)
            .count()
    }
}
