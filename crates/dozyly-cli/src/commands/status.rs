//! Status command for showing where the log lives and when it last changed.

use std::io::Write;

use anyhow::Result;
use chrono::SecondsFormat;

use dozyly_core::{SleepLog, Storage};

use crate::Config;

pub fn run<W: Write, S: Storage>(writer: &mut W, config: &Config, log: &SleepLog<S>) -> Result<()> {
    writeln!(writer, "Dozyly status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Entries: {}", log.len())?;

    match log.last_updated() {
        Some(at) => writeln!(
            writer,
            "Last updated: {}",
            at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )?,
        None => writeln!(writer, "Last updated: never")?,
    }

    Ok(())
}
