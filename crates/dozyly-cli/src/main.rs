use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dozyly_cli::commands::{add, chart, delete, list, status, suggest};
use dozyly_cli::{Cli, Commands, Config};
use dozyly_core::SleepLog;
use dozyly_db::Database;

/// Load config and open the sleep log, ensuring the database directory exists.
fn open_log(config_path: Option<&Path>) -> Result<(SleepLog<Database>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((SleepLog::open(db), config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let today = Local::now().date_naive();
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Add(args)) => {
            let (mut log, _config) = open_log(cli.config.as_deref())?;
            add::run(&mut out, &mut log, args, today.into())?;
        }
        Some(Commands::List { json }) => {
            let (log, _config) = open_log(cli.config.as_deref())?;
            list::run(&mut out, log.entries(), *json)?;
        }
        Some(Commands::Delete { id }) => {
            let (mut log, _config) = open_log(cli.config.as_deref())?;
            delete::run(&mut out, &mut log, id)?;
        }
        Some(Commands::Chart { days, json }) => {
            let (log, config) = open_log(cli.config.as_deref())?;
            let days = days.unwrap_or(config.chart_days);
            if days == 0 {
                bail!("chart_days must be at least 1");
            }
            chart::run(&mut out, log.entries(), days, today, *json)?;
        }
        Some(Commands::Suggest { json }) => {
            let (log, _config) = open_log(cli.config.as_deref())?;
            suggest::run(&mut out, log.entries(), *json)?;
        }
        Some(Commands::Status) => {
            let (log, config) = open_log(cli.config.as_deref())?;
            status::run(&mut out, &config, &log)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
