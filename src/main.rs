use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use bigtimer::cli::args::{Cli, Commands};
use bigtimer::cli::commands::{self, Context};
use bigtimer::config::{Config, Paths};
use bigtimer::error::BigTimerError;
use bigtimer::logging::enable_logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), BigTimerError> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        println!("{}", commands::generate_completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.home.as_deref())?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;

    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    if let Err(e) = enable_logging(&paths.logs, level, config.logging.max_files, cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    debug!(root = %paths.root.display(), "Using data directory");

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = Context::open(&paths, config)?;

    let output = match cli.command {
        Commands::Start => commands::start(&ctx, format)?,
        Commands::Stop => commands::stop(&ctx, format)?,
        Commands::Reset => commands::reset(&ctx, format)?,
        Commands::Submit => commands::submit(&ctx, format)?,
        Commands::Status => commands::status(&ctx, format)?,
        Commands::Watch => commands::watch(&ctx, format)?,
        Commands::Routine(args) => commands::routine(&ctx, &args, format)?,
        Commands::History { date } => commands::history(&ctx, date.as_deref(), format)?,
        Commands::Calendar { month, prev } => {
            commands::calendar(&ctx, month.as_deref(), prev, format)?
        },
        Commands::Add(args) => commands::add(&ctx, args, format)?,
        Commands::Edit(args) => commands::edit(&ctx, args, format)?,
        Commands::Powder { id } => commands::powder(&ctx, &id, format)?,
        Commands::Delete { id } => commands::delete(&ctx, &id, format)?,
        Commands::Completions { shell } => commands::generate_completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
