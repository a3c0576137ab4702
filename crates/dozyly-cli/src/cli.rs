//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use dozyly_core::{Quality, ValidationError};

/// Dozyly sleep tracker.
///
/// Log when you fell asleep and woke up, see how your nights trend, and get
/// tips based on how you have been sleeping.
#[derive(Debug, Parser)]
#[command(name = "dozyly", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a night of sleep.
    Add(AddArgs),

    /// List logged entries, newest first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete an entry by ID.
    Delete {
        /// ID of the entry to delete (see `dozyly list`).
        id: String,
    },

    /// Show sleep statistics and a duration chart.
    Chart {
        /// Number of days to cover (defaults to the configured range).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: Option<u32>,

        /// Output statistics and chart series as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest ways to sleep better based on recent nights.
    Suggest {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show where data is stored and when it last changed.
    Status,
}

/// Arguments for `dozyly add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Time you fell asleep (HH:MM).
    #[arg(long = "sleep", value_name = "HH:MM")]
    pub sleep_time: Option<String>,

    /// Time you woke up (HH:MM). Earlier than the sleep time means the next day.
    #[arg(long = "wake", value_name = "HH:MM")]
    pub wake_time: Option<String>,

    /// How the night went: good, bad, or interrupted.
    #[arg(short, long, default_value = "good", value_parser = parse_quality)]
    pub quality: Quality,
}

fn parse_quality(s: &str) -> Result<Quality, ValidationError> {
    s.parse()
}
