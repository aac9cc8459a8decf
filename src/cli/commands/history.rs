//! Session history commands.

use chrono::{Datelike, Local, NaiveDate};
use colored::Colorize;
use serde_json::json;

use super::{parse_routines, Context};
use crate::cli::args::{AddSessionArgs, EditSessionArgs, OutputFormat};
use crate::core::{parse_day, parse_month, parse_time_of_day};
use crate::error::BigTimerError;
use crate::features::history::{shift_month, ManualEntry, MonthView, SessionEdit};
use crate::features::timer::{parse_duration, DurationParts};
use crate::output::{format_calendar, format_session, format_sessions, to_json};

fn day_title(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%A, %B %-d %Y").to_string()
    }
}

fn parse_seconds(input: &str) -> Result<u64, BigTimerError> {
    parse_duration(input)
        .ok_or_else(|| BigTimerError::InvalidArgument(format!("Unrecognized duration: '{input}'")))
}

/// Execute history command
///
/// # Errors
///
/// Returns `InvalidArgument` if the date cannot be parsed.
pub fn history(
    ctx: &Context,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    let today = ctx.today();
    let day = match date {
        None => today,
        Some(input) => parse_day(input, today)
            .ok_or_else(|| BigTimerError::InvalidArgument(format!("Unrecognized date: '{input}'")))?,
    };

    let store = ctx.sessions();
    let sessions = store.sessions_for_day_in(day, &Local);
    format_sessions(&sessions, day, &day_title(day, today), format)
}

/// Execute calendar command
///
/// # Errors
///
/// Returns `InvalidArgument` if the month cannot be parsed or is out of range.
pub fn calendar(
    ctx: &Context,
    month: Option<&str>,
    prev: u32,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    let today = ctx.today();
    let (year, month) = match month {
        None => (today.year(), today.month()),
        Some(input) => parse_month(input, today).ok_or_else(|| {
            BigTimerError::InvalidArgument(format!("Unrecognized month: '{input}'"))
        })?,
    };

    let out_of_range = || BigTimerError::InvalidArgument("Month out of range".to_string());
    let anchor = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let delta = i32::try_from(prev).map_err(|_| out_of_range())?;
    let first = shift_month(anchor, -delta).ok_or_else(out_of_range)?;

    let view = MonthView::build(&ctx.sessions(), first.year(), first.month(), &Local);
    format_calendar(&view, format)
}

/// Execute add command
///
/// # Errors
///
/// Returns `InvalidArgument` for unparseable input, a zero duration, or a
/// time that does not exist on that day, and an error if the session list
/// cannot be written.
pub fn add(
    ctx: &Context,
    args: AddSessionArgs,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    let now = ctx.now().with_timezone(&Local);
    let today = now.date_naive();

    let day = match args.date.as_deref() {
        None => today,
        Some(input) => parse_day(input, today)
            .ok_or_else(|| BigTimerError::InvalidArgument(format!("Unrecognized date: '{input}'")))?,
    };
    let time = match args.time.as_deref() {
        None => now.time(),
        Some(input) => parse_time_of_day(input)
            .ok_or_else(|| BigTimerError::InvalidArgument(format!("Unrecognized time: '{input}'")))?,
    };

    let seconds = parse_seconds(&args.duration)?;
    if seconds == 0 {
        return Err(BigTimerError::InvalidArgument(
            "Duration must be longer than zero".to_string(),
        ));
    }

    let entry = ManualEntry {
        day,
        time,
        duration: DurationParts::from_seconds(seconds),
        routines: parse_routines(&args.routine)?,
        ate_powder: args.powder,
    };
    let session = entry.into_session(&Local).ok_or_else(|| {
        BigTimerError::InvalidArgument(format!("{time} does not exist on {day} in this timezone"))
    })?;

    let mut store = ctx.sessions();
    store.add(session.clone());
    store.persist()?;

    match format {
        OutputFormat::Json => format_session(&session, format),
        OutputFormat::Pretty => Ok(format!(
            "{}\n{}",
            "✓ Logged workout".green(),
            format_session(&session, format)?
        )),
    }
}

/// Execute edit command
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, `InvalidArgument` for bad input or
/// when nothing would change, and an error if the session list cannot be
/// written.
pub fn edit(
    ctx: &Context,
    args: EditSessionArgs,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    if args.duration.is_none() && args.routine.is_empty() && !args.no_routines {
        return Err(BigTimerError::InvalidArgument(
            "Nothing to change, pass --duration, --routine or --no-routines".to_string(),
        ));
    }

    let mut store = ctx.sessions();
    let id = store.resolve(&args.id)?;
    let current = store
        .get(id)
        .ok_or_else(|| BigTimerError::NotFound(format!("Session '{}'", args.id)))?;

    let mut edit = SessionEdit::from_session(current);
    if let Some(input) = args.duration.as_deref() {
        edit.duration = DurationParts::from_seconds(parse_seconds(input)?);
    }
    if args.no_routines {
        edit.routines.clear();
    } else if !args.routine.is_empty() {
        edit.routines = parse_routines(&args.routine)?;
    }

    edit.apply(&mut store, id);
    store.persist()?;

    let updated = store
        .get(id)
        .ok_or_else(|| BigTimerError::NotFound(format!("Session '{}'", args.id)))?;
    match format {
        OutputFormat::Json => format_session(updated, format),
        OutputFormat::Pretty => Ok(format!(
            "{}\n{}",
            "✓ Updated workout".green(),
            format_session(updated, format)?
        )),
    }
}

/// Execute powder command
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or an error if the session list
/// cannot be written.
pub fn powder(ctx: &Context, id: &str, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut store = ctx.sessions();
    let uuid = store.resolve(id)?;
    let ate_powder = store
        .toggle_powder(uuid)
        .ok_or_else(|| BigTimerError::NotFound(format!("Session '{id}'")))?;
    store.persist()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": uuid, "atePowder": ate_powder })),
        OutputFormat::Pretty if ate_powder => Ok(format!("🥛 Powder logged for {id}")),
        OutputFormat::Pretty => Ok(format!("Powder cleared for {id}")),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or an error if the session list
/// cannot be written.
pub fn delete(ctx: &Context, id: &str, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut store = ctx.sessions();
    let uuid = store.resolve(id)?;
    store.delete(uuid);
    store.persist()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": uuid })),
        OutputFormat::Pretty => Ok(format!("{} {uuid}", "✗ Deleted workout".red())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::create_test_context;
    use crate::features::sessions::{Routine, WorkoutSession};
    use chrono::{Duration, TimeZone, Utc};

    fn add_args(duration: &str, routines: &[&str]) -> AddSessionArgs {
        AddSessionArgs {
            date: None,
            time: None,
            duration: duration.to_string(),
            routine: routines.iter().map(ToString::to_string).collect(),
            powder: false,
        }
    }

    fn only_session(ctx: &Context) -> WorkoutSession {
        let store = ctx.sessions();
        assert_eq!(store.len(), 1);
        store.all()[0].clone()
    }

    #[test]
    fn test_day_title() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(day_title(today, today), "Today");
        assert_eq!(day_title(today - Duration::days(1), today), "Yesterday");
        assert_eq!(
            day_title(NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(), today),
            "Saturday, October 3 2026"
        );
    }

    #[test]
    fn test_add_then_history_today() {
        let (ctx, _clock) = create_test_context();
        add(&ctx, add_args("45", &["legs"]), OutputFormat::Pretty).unwrap();

        let session = only_session(&ctx);
        assert_eq!(session.duration, 2700);
        assert_eq!(session.routines, vec![Routine::Legs]);

        let output = history(&ctx, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["totalSeconds"], 2700);
    }

    #[test]
    fn test_add_with_date_and_time() {
        let (ctx, _clock) = create_test_context();
        let mut args = add_args("1h10m", &["back", "biceps"]);
        args.date = Some("2026-10-03".to_string());
        args.time = Some("6pm".to_string());
        args.powder = true;

        add(&ctx, args, OutputFormat::Json).unwrap();

        let session = only_session(&ctx);
        let local = session.date_local();
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 3).unwrap());
        assert_eq!(local.format("%H:%M").to_string(), "18:00");
        assert_eq!(session.duration, 4200);
        assert!(session.ate_powder);

        let output = history(&ctx, Some("2026-10-03"), OutputFormat::Json).unwrap();
        assert!(output.contains("\"count\": 1"));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (ctx, _clock) = create_test_context();

        let result = add(&ctx, add_args("0", &[]), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        let result = add(&ctx, add_args("soon", &[]), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        let result = add(&ctx, add_args("400000000000000000", &[]), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        let result = add(&ctx, add_args("30", &["cardio"]), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        assert!(ctx.sessions().is_empty());
    }

    #[test]
    fn test_history_bad_date() {
        let (ctx, _clock) = create_test_context();
        let result = history(&ctx, Some("someday"), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        let result = history(&ctx, Some("99999999 days ago"), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));
    }

    #[test]
    fn test_edit_duration_and_routines() {
        let (ctx, _clock) = create_test_context();
        add(&ctx, add_args("10", &["chest"]), OutputFormat::Pretty).unwrap();
        let session = only_session(&ctx);

        let args = EditSessionArgs {
            id: session.short_id(),
            duration: Some("20m".to_string()),
            routine: vec!["shoulder".to_string(), "chest".to_string()],
            no_routines: false,
        };
        edit(&ctx, args, OutputFormat::Pretty).unwrap();

        let edited = only_session(&ctx);
        assert_eq!(edited.id, session.id);
        assert_eq!(edited.duration, 1200);
        assert_eq!(edited.routines, vec![Routine::Chest, Routine::Shoulder]);
    }

    #[test]
    fn test_edit_requires_a_change() {
        let (ctx, _clock) = create_test_context();
        add(&ctx, add_args("10", &[]), OutputFormat::Pretty).unwrap();
        let session = only_session(&ctx);

        let args = EditSessionArgs {
            id: session.short_id(),
            duration: None,
            routine: vec![],
            no_routines: false,
        };
        assert!(matches!(
            edit(&ctx, args, OutputFormat::Pretty),
            Err(BigTimerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_powder_toggles() {
        let (ctx, _clock) = create_test_context();
        add(&ctx, add_args("30", &[]), OutputFormat::Pretty).unwrap();
        let id = only_session(&ctx).short_id();

        let output = powder(&ctx, &id, OutputFormat::Json).unwrap();
        assert!(output.contains("\"atePowder\": true"));
        assert!(only_session(&ctx).ate_powder);

        powder(&ctx, &id, OutputFormat::Pretty).unwrap();
        assert!(!only_session(&ctx).ate_powder);
    }

    #[test]
    fn test_delete_and_unknown_id() {
        let (ctx, _clock) = create_test_context();
        add(&ctx, add_args("30", &[]), OutputFormat::Pretty).unwrap();
        let id = only_session(&ctx).short_id();

        delete(&ctx, &id, OutputFormat::Pretty).unwrap();
        assert!(ctx.sessions().is_empty());

        assert!(matches!(
            delete(&ctx, &id, OutputFormat::Pretty),
            Err(BigTimerError::NotFound(_))
        ));
    }

    #[test]
    fn test_calendar_for_month() {
        let (ctx, _clock) = create_test_context();
        let mut store = ctx.sessions();
        let noon = Local.with_ymd_and_hms(2026, 9, 12, 12, 0, 0).unwrap();
        store.add(WorkoutSession::at(
            noon.with_timezone(&Utc),
            900,
            [Routine::Back],
            false,
        ));

        let output = calendar(&ctx, Some("2026-10"), 1, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["month"], "2026-09");
        assert_eq!(value["activeDays"], 1);
        assert_eq!(value["days"][0]["date"], "2026-09-12");
    }

    #[test]
    fn test_calendar_bad_month() {
        let (ctx, _clock) = create_test_context();
        let result = calendar(&ctx, Some("smarch"), 0, OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));
    }
}
