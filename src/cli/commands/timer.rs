//! Stopwatch commands.

use std::sync::Arc;

use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::{parse_routines, Context};
use crate::cli::args::{OutputFormat, RoutineArgs};
use crate::error::BigTimerError;
use crate::features::sessions::join_routines;
use crate::features::timer::{
    format_dial, run_ticker, ActivitySender, ActivityWorker, LiveActivity, NoopActivity,
    TerminalActivity, TimerState,
};
use crate::output::{format_session, format_status, to_json, TimerStatus};
use crate::runtime::{detect_shutdown, single_thread_runtime};

/// Execute start command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn start(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut tracker = ctx.tracker(ActivitySender::disabled());
    let before = tracker.state();
    tracker.start();
    let status = TimerStatus::of(&tracker);

    match format {
        OutputFormat::Json => to_json(&status),
        OutputFormat::Pretty => Ok(match before {
            TimerState::Running => format!(
                "Stopwatch already running at {}",
                format_dial(status.elapsed_seconds).bold()
            )
            .yellow()
            .to_string(),
            TimerState::Paused => format!(
                "{} from {}",
                "▶ Continued".green(),
                format_dial(status.elapsed_seconds).bold()
            ),
            TimerState::Idle => {
                let mut output = vec!["▶ Stopwatch started".green().to_string()];
                output.push(String::new());
                output.push("   Use 'bigtimer watch' to see it live".dimmed().to_string());
                output.push("   Use 'bigtimer submit' when done".dimmed().to_string());
                output.join("\n")
            },
        }),
    }
}

/// Execute stop command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn stop(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut tracker = ctx.tracker(ActivitySender::disabled());
    let was_running = tracker.is_running();
    tracker.stop();
    let status = TimerStatus::of(&tracker);

    match format {
        OutputFormat::Json => to_json(&status),
        OutputFormat::Pretty if !was_running => {
            Ok("Stopwatch is not running".yellow().to_string())
        },
        OutputFormat::Pretty => Ok(format!(
            "{} at {}",
            "⏸ Paused".yellow(),
            format_dial(status.elapsed_seconds).bold()
        )),
    }
}

/// Execute reset command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn reset(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut tracker = ctx.tracker(ActivitySender::disabled());
    tracker.reset();

    match format {
        OutputFormat::Json => to_json(&TimerStatus::of(&tracker)),
        OutputFormat::Pretty => Ok("Stopwatch reset".to_string()),
    }
}

/// Execute submit command
///
/// # Errors
///
/// Returns `NotFound` if the stopwatch reads zero, or an error if the
/// session list cannot be written.
pub fn submit(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let mut tracker = ctx.tracker(ActivitySender::disabled());
    let mut store = ctx.sessions();

    let Some(session) = tracker.submit(&mut store) else {
        return Err(BigTimerError::NotFound(
            "Nothing to submit, the stopwatch reads 00:00:00".to_string(),
        ));
    };
    store.persist()?;

    match format {
        OutputFormat::Json => format_session(&session, format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} workout  {}",
            "✓ Saved".green(),
            format_dial(session.duration).bold(),
            session.short_id().dimmed()
        )),
    }
}

/// Execute status command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let tracker = ctx.tracker(ActivitySender::disabled());
    format_status(&TimerStatus::of(&tracker), format)
}

/// Execute routine command
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown routine name.
pub fn routine(
    ctx: &Context,
    args: &RoutineArgs,
    format: OutputFormat,
) -> Result<String, BigTimerError> {
    let routines = parse_routines(&args.routines)?;
    let mut tracker = ctx.tracker(ActivitySender::disabled());

    if args.clear {
        tracker.set_routines([]);
    } else {
        for routine in routines {
            tracker.toggle_routine(routine);
        }
    }

    let selected = tracker.selected_routines();
    match format {
        OutputFormat::Json => to_json(&TimerStatus::of(&tracker)),
        OutputFormat::Pretty if selected.is_empty() => {
            Ok(format!("{}: {}", "Routines".dimmed(), "none selected".dimmed()))
        },
        OutputFormat::Pretty => Ok(format!(
            "{}: {}",
            "Routines".dimmed(),
            join_routines(&selected).cyan()
        )),
    }
}

/// Execute watch command
///
/// Starts the stopwatch if needed and redraws it until Ctrl-C. The stopwatch
/// is left running.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built or output formatting fails.
pub fn watch(ctx: &Context, format: OutputFormat) -> Result<String, BigTimerError> {
    let runtime = single_thread_runtime()?;
    let status = runtime.block_on(watch_until_interrupted(ctx));

    match format {
        OutputFormat::Json => to_json(&status),
        OutputFormat::Pretty => Ok(format!(
            "Still running at {}. Use 'bigtimer stop' to pause",
            format_dial(status.elapsed_seconds).bold()
        )),
    }
}

async fn watch_until_interrupted(ctx: &Context) -> TimerStatus {
    let surface: Arc<dyn LiveActivity> = if ctx.config.timer.live_activity {
        Arc::new(TerminalActivity)
    } else {
        Arc::new(NoopActivity)
    };

    let (sender, rx) = ActivitySender::channel();
    let worker = tokio::spawn(ActivityWorker::new(surface.clone(), rx).run());

    let mut tracker = ctx.tracker(sender);
    tracker.start();

    let shutdown = CancellationToken::new();
    let signals = tokio::spawn(detect_shutdown(shutdown.clone()));

    run_ticker(&mut tracker, ctx.config.timer.tick_interval(), shutdown.clone()).await;
    shutdown.cancel();

    let status = TimerStatus::of(&tracker);

    // Closes the channel so the worker drains and exits
    drop(tracker);
    if let Err(e) = worker.await {
        warn!("Live activity worker failed: {e}");
    }
    if let Err(e) = signals.await {
        warn!("Signal listener failed: {e}");
    }
    if let Err(e) = surface.end().await {
        warn!("Error closing live activity: {e}");
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::create_test_context;
    use chrono::Duration;

    fn routine_args(names: &[&str]) -> RoutineArgs {
        RoutineArgs {
            routines: names.iter().map(ToString::to_string).collect(),
            clear: false,
        }
    }

    #[test]
    fn test_start_then_status() {
        let (ctx, clock) = create_test_context();
        let output = start(&ctx, OutputFormat::Pretty).unwrap();
        assert!(output.contains("Stopwatch started"));

        clock.advance(Duration::seconds(95));
        let output = status(&ctx, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["state"], "running");
        assert_eq!(value["elapsedSeconds"], 95);
    }

    #[test]
    fn test_start_twice_reports_running() {
        let (ctx, _clock) = create_test_context();
        start(&ctx, OutputFormat::Pretty).unwrap();
        let output = start(&ctx, OutputFormat::Pretty).unwrap();
        assert!(output.contains("already running"));
    }

    #[test]
    fn test_stop_and_continue() {
        let (ctx, clock) = create_test_context();
        start(&ctx, OutputFormat::Pretty).unwrap();
        clock.advance(Duration::seconds(30));

        let output = stop(&ctx, OutputFormat::Pretty).unwrap();
        assert!(output.contains("Paused"));
        assert!(output.contains("00:00:30"));

        clock.advance(Duration::minutes(10));
        let output = start(&ctx, OutputFormat::Pretty).unwrap();
        assert!(output.contains("Continued"));
        assert!(output.contains("00:00:30"));
    }

    #[test]
    fn test_stop_when_idle() {
        let (ctx, _clock) = create_test_context();
        let output = stop(&ctx, OutputFormat::Pretty).unwrap();
        assert!(output.contains("not running"));
    }

    #[test]
    fn test_submit_saves_session() {
        let (ctx, clock) = create_test_context();
        routine(&ctx, &routine_args(&["legs", "back"]), OutputFormat::Pretty).unwrap();
        start(&ctx, OutputFormat::Pretty).unwrap();
        clock.advance(Duration::seconds(125));

        let output = submit(&ctx, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["duration"], 125);
        assert_eq!(value["routines"], serde_json::json!(["Back", "Legs"]));

        let store = ctx.sessions();
        assert_eq!(store.len(), 1);

        let output = status(&ctx, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["state"], "idle");
        assert_eq!(value["routines"], serde_json::json!([]));
    }

    #[test]
    fn test_submit_nothing() {
        let (ctx, _clock) = create_test_context();
        let result = submit(&ctx, OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::NotFound(_))));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (ctx, clock) = create_test_context();
        start(&ctx, OutputFormat::Pretty).unwrap();
        routine(&ctx, &routine_args(&["chest"]), OutputFormat::Pretty).unwrap();
        clock.advance(Duration::seconds(12));

        reset(&ctx, OutputFormat::Pretty).unwrap();

        let tracker = ctx.tracker(ActivitySender::disabled());
        assert_eq!(tracker.state(), TimerState::Idle);
        assert!(tracker.selected_routines().is_empty());
    }

    #[test]
    fn test_routine_toggle_and_clear() {
        let (ctx, _clock) = create_test_context();

        let output = routine(&ctx, &routine_args(&["back", "triceps"]), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Back, Triceps"));

        let output = routine(&ctx, &routine_args(&["back"]), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Triceps"));
        assert!(!output.contains("Back"));

        let clear = RoutineArgs {
            routines: vec![],
            clear: true,
        };
        let output = routine(&ctx, &clear, OutputFormat::Pretty).unwrap();
        assert!(output.contains("none selected"));
    }

    #[test]
    fn test_routine_unknown_name() {
        let (ctx, _clock) = create_test_context();
        let result = routine(&ctx, &routine_args(&["cardio"]), OutputFormat::Pretty);
        assert!(matches!(result, Err(BigTimerError::InvalidArgument(_))));

        // Nothing was toggled
        let tracker = ctx.tracker(ActivitySender::disabled());
        assert!(tracker.selected_routines().is_empty());
    }
}
