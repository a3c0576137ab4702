//! Add command for logging a night of sleep.

use std::io::Write;

use anyhow::{Result, bail};

use dozyly_core::{EntryDate, LogError, SleepForm, SleepLog, Storage};

use super::list::write_entry;
use crate::cli::AddArgs;
use crate::notice::Notice;

/// Validates the arguments and logs a new entry dated `today`.
///
/// Field problems are printed one per line before the command fails.
pub fn run<W: Write, S: Storage>(
    writer: &mut W,
    log: &mut SleepLog<S>,
    args: &AddArgs,
    today: EntryDate,
) -> Result<()> {
    let form = SleepForm::new(
        args.sleep_time.clone().unwrap_or_default(),
        args.wake_time.clone().unwrap_or_default(),
        args.quality,
    );

    match log.add(&form, today) {
        Ok(entry) => {
            Notice::success("Sleep entry added successfully!").write_to(writer)?;
            writeln!(writer)?;
            write_entry(writer, entry)?;
            Ok(())
        }
        Err(LogError::Validation(fields)) => {
            for message in fields.messages() {
                Notice::error(message).write_to(writer)?;
            }
            bail!("sleep entry not added")
        }
        Err(e) => {
            Notice::error("Failed to save sleep entry").write_to(writer)?;
            Err(e.into())
        }
    }
}
