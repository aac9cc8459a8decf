//! Browsing and editing past workouts.

mod calendar;
mod entry;

pub use calendar::{day_routines, month_grid, shift_month, DayCell, MonthView};
pub use entry::{ManualEntry, SessionEdit};
