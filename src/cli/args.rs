use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;

#[derive(Parser)]
#[command(name = "bigtimer")]
#[command(about = "A workout stopwatch and training log for the terminal")]
#[command(long_about = "bigtimer - A workout stopwatch and training log

Time your workouts, tag them with the muscle groups you trained and browse
your history by day or by month. The stopwatch survives restarts: start it,
close the terminal, and 'bigtimer status' still shows the right time.

QUICK START:
  bigtimer start                 Start the stopwatch
  bigtimer routine back legs     Tag what you are training
  bigtimer watch                 Show the running clock until Ctrl-C
  bigtimer submit                Save the workout and reset
  bigtimer history yesterday     List yesterday's workouts

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  bigtimer <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` setting in config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory holding the database, config and logs
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Also write log events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the stopwatch, or continue after a pause
    ///
    /// The start instant is saved, so the clock keeps counting after this
    /// process exits.
    #[command(alias = "s")]
    Start,

    /// Pause the stopwatch
    #[command(alias = "pause")]
    Stop,

    /// Clear the stopwatch and the selected routines
    Reset,

    /// Save the current workout and reset
    ///
    /// A running stopwatch is stopped first. Nothing is saved when the clock
    /// reads zero.
    Submit,

    /// Show the stopwatch state
    #[command(alias = "st")]
    Status,

    /// Start the stopwatch and show it live until Ctrl-C
    ///
    /// Interrupting only closes the display. The stopwatch keeps running
    /// until 'bigtimer stop' or 'bigtimer submit'.
    #[command(alias = "w")]
    Watch,

    /// Toggle routines on the current workout
    ///
    /// # Examples
    ///
    ///   bigtimer routine back legs
    ///   bigtimer routine chest,triceps
    ///   bigtimer routine --clear
    #[command(alias = "r")]
    Routine(RoutineArgs),

    /// List workouts on a day
    ///
    /// DATE accepts today, yesterday, a weekday (the most recent one),
    /// "3 days ago", "oct 3", 2026-10-03 or 10/03/2026. Defaults to today.
    #[command(alias = "h")]
    History {
        /// Day to show
        date: Option<String>,
    },

    /// Show a month with workout days marked
    #[command(alias = "cal")]
    Calendar {
        /// Month to show: 2026-10, oct, or "oct 2026". Defaults to this month
        month: Option<String>,

        /// Go back this many months from the chosen month
        #[arg(long, short = 'p', default_value_t = 0)]
        prev: u32,
    },

    /// Log a workout after the fact
    ///
    /// # Examples
    ///
    ///   bigtimer add --duration 45 --routine legs
    ///   bigtimer add --date yesterday --time 6pm --duration 1h10m -r back -r biceps --powder
    Add(AddSessionArgs),

    /// Change the duration or routines of a workout
    Edit(EditSessionArgs),

    /// Toggle whether protein powder was taken after a workout
    Powder {
        /// Session id or unique prefix
        id: String,
    },

    /// Delete a workout
    #[command(alias = "rm")]
    Delete {
        /// Session id or unique prefix
        id: String,
    },

    /// Generate shell completions
    ///
    /// Example: bigtimer completions zsh > ~/.zsh/completions/_bigtimer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct RoutineArgs {
    /// Routines to toggle (back, legs, chest, shoulder, biceps, triceps)
    #[arg(value_delimiter = ',', required_unless_present = "clear")]
    pub routines: Vec<String>,

    /// Deselect every routine
    #[arg(long, conflicts_with = "routines")]
    pub clear: bool,
}

#[derive(Args)]
pub struct AddSessionArgs {
    /// Day of the workout. Defaults to today
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Time of day, like 18:30, 6pm or evening. Defaults to now
    #[arg(long, short = 't')]
    pub time: Option<String>,

    /// Length: 45 (minutes), 1h10m, 90s or 1:05:00
    #[arg(long, short = 'D')]
    pub duration: String,

    /// Routine trained; repeat or separate with commas
    #[arg(long, short = 'r', value_delimiter = ',')]
    pub routine: Vec<String>,

    /// Protein powder was taken afterwards
    #[arg(long)]
    pub powder: bool,
}

#[derive(Args)]
pub struct EditSessionArgs {
    /// Session id or unique prefix
    pub id: String,

    /// New length: 45 (minutes), 1h10m, 90s or 1:05:00
    #[arg(long, short = 'D')]
    pub duration: Option<String>,

    /// Replace the routines; repeat or separate with commas
    #[arg(long, short = 'r', value_delimiter = ',')]
    pub routine: Vec<String>,

    /// Remove every routine from the workout
    #[arg(long, conflicts_with = "routine")]
    pub no_routines: bool,
}
