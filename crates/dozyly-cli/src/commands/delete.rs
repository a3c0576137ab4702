//! Delete command for removing an entry by ID.

use std::io::Write;

use anyhow::{Context, Result, bail};

use dozyly_core::{EntryId, SleepLog, Storage};

use crate::notice::Notice;

pub fn run<W: Write, S: Storage>(writer: &mut W, log: &mut SleepLog<S>, id: &str) -> Result<()> {
    let id = EntryId::new(id.trim()).context("invalid entry id")?;

    match log.delete(&id) {
        Ok(Some(_)) => {}
        Ok(None) => bail!("no sleep entry with id {id}"),
        Err(e) => {
            Notice::error("Failed to delete sleep entry").write_to(writer)?;
            return Err(e.into());
        }
    }

    Notice::success("Sleep entry deleted").write_to(writer)?;
    Ok(())
}
