use colored::Colorize;

use super::TimerStatus;
use crate::features::history::{DayCell, MonthView};
use crate::features::sessions::{join_routines, WorkoutSession};
use crate::features::timer::{format_clock_compact, format_dial, format_duration, TimerState};

const POWDER_MARK: &str = "🥛";

fn routines_or_dash(session: &WorkoutSession) -> String {
    if session.routines.is_empty() {
        "-".dimmed().to_string()
    } else {
        join_routines(&session.routines).cyan().to_string()
    }
}

/// Format the stopwatch status
pub fn format_status_pretty(status: &TimerStatus) -> String {
    let state = match status.state {
        TimerState::Idle => "Idle".white(),
        TimerState::Running => "Running".green().bold(),
        TimerState::Paused => "Paused".yellow(),
    };

    let mut output = format!("{}  {}\n", format_dial(status.elapsed_seconds).bold(), state);

    if status.routines.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Routines".dimmed(), "none selected".dimmed()));
    } else {
        output.push_str(&format!(
            "  {}: {}\n",
            "Routines".dimmed(),
            join_routines(&status.routines).cyan()
        ));
    }

    if let Some(started) = status.started_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Counting from".dimmed(),
            started.with_timezone(&chrono::Local).format("%H:%M:%S")
        ));
    }

    output
}

/// Format a day of sessions as a list
pub fn format_sessions_pretty(sessions: &[&WorkoutSession], title: &str) -> String {
    if sessions.is_empty() {
        return format!("{title} (0 workouts)\n  No workouts");
    }

    let total: u64 = sessions.iter().map(|s| s.duration).sum();
    let mut output = format!(
        "{} ({} workout{}, {})\n",
        title,
        sessions.len(),
        if sessions.len() == 1 { "" } else { "s" },
        format_duration(total)
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in sessions {
        let mut line = format!(
            "{}  {}  {}",
            session.date_local().format("%H:%M").to_string().dimmed(),
            format_clock_compact(session.duration).bold(),
            routines_or_dash(session)
        );

        if session.ate_powder {
            line.push_str(&format!("  {POWDER_MARK}"));
        }

        line.push_str(&format!("  {}", session.short_id().dimmed()));
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single session with all details
pub fn format_session_pretty(session: &WorkoutSession) -> String {
    let mut output = format!(
        "{} {}\n",
        format_clock_compact(session.duration).bold(),
        routines_or_dash(session)
    );
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), session.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Date".dimmed(),
        session.date_local().format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        format_duration(session.duration)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Powder".dimmed(),
        if session.ate_powder { "yes" } else { "no" }
    ));
    output
}

fn day_label(cell: Option<&DayCell>) -> String {
    match cell {
        None => "  ".to_string(),
        Some(cell) if cell.has_sessions => {
            format!("{:>2}", chrono::Datelike::day(&cell.date)).green().bold().to_string()
        },
        Some(cell) => format!("{:>2}", chrono::Datelike::day(&cell.date)),
    }
}

/// Format a month as a Sunday-first grid, followed by the routines of each active day
pub fn format_calendar_pretty(view: &MonthView) -> String {
    let mut output = format!("{}\n", view.title().bold());
    output.push_str(&"Su Mo Tu We Th Fr Sa".dimmed().to_string());
    output.push('\n');

    for week in view.weeks() {
        let row = week
            .iter()
            .map(|cell| day_label(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(row.trim_end());
        output.push('\n');
    }

    let active: Vec<&DayCell> = view.cells.iter().flatten().filter(|c| c.has_sessions).collect();
    if active.is_empty() {
        output.push_str(&"\n  No workouts this month".dimmed().to_string());
        return output;
    }

    output.push('\n');
    for cell in active {
        let routines = if cell.routines.is_empty() {
            "-".dimmed().to_string()
        } else {
            join_routines(&cell.routines).cyan().to_string()
        };
        output.push_str(&format!("  {}  {}\n", cell.date.format("%a %d"), routines));
    }

    output
}
