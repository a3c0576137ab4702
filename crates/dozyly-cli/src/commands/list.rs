//! List command for showing logged entries, newest first.

use std::io::Write;

use anyhow::Result;

use dozyly_core::SleepEntry;

/// Writes one entry as a short indented block.
pub(crate) fn write_entry<W: Write>(writer: &mut W, entry: &SleepEntry) -> Result<()> {
    writeln!(writer, "{}  {}", entry.date, entry.quality)?;
    writeln!(
        writer,
        "  Sleep: {} - Wake: {}",
        entry.sleep_time, entry.wake_time
    )?;
    writeln!(writer, "  Duration: {} hours", entry.duration())?;
    writeln!(writer, "  ID: {}", entry.id)?;
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, entries: &[SleepEntry], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *writer, entries)?;
        writeln!(writer)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(
            writer,
            "No sleep entries yet. Add your first entry with 'dozyly add'!"
        )?;
        return Ok(());
    }

    writeln!(writer, "Sleep entries ({})", entries.len())?;
    for entry in entries {
        writeln!(writer)?;
        write_entry(writer, entry)?;
    }

    Ok(())
}
