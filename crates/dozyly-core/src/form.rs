//! Sleep entry form validation.
//!
//! Turns raw user input into a [`SleepEntry`], reporting problems per field so
//! the caller can show them next to the offending input.

use thiserror::Error;

use crate::entry::{Quality, SleepEntry};
use crate::types::{EntryDate, EntryId, TimeOfDay};

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SleepForm {
    pub sleep_time: String,
    pub wake_time: String,
    pub quality: Quality,
}

impl SleepForm {
    pub fn new(sleep_time: impl Into<String>, wake_time: impl Into<String>, quality: Quality) -> Self {
        Self {
            sleep_time: sleep_time.into(),
            wake_time: wake_time.into(),
            quality,
        }
    }

    /// Validates both time fields, collecting every field error.
    pub fn validate(&self) -> Result<(TimeOfDay, TimeOfDay), FieldErrors> {
        let sleep = parse_field(&self.sleep_time, "Sleep time cannot be empty", "Sleep time must be HH:MM");
        let wake = parse_field(&self.wake_time, "Please enter wake time", "Wake time must be HH:MM");

        match (sleep, wake) {
            (Ok(sleep), Ok(wake)) => Ok((sleep, wake)),
            (sleep, wake) => Err(FieldErrors {
                sleep_time: sleep.err(),
                wake_time: wake.err(),
            }),
        }
    }

    /// Validates the form and builds a new entry logged on `date`.
    pub fn build(&self, id: EntryId, date: EntryDate) -> Result<SleepEntry, FieldErrors> {
        let (sleep, wake) = self.validate()?;
        Ok(SleepEntry::new(id, sleep, wake, self.quality, date))
    }
}

fn parse_field(
    raw: &str,
    empty_message: &'static str,
    invalid_message: &'static str,
) -> Result<TimeOfDay, &'static str> {
    if raw.trim().is_empty() {
        return Err(empty_message);
    }
    raw.parse().map_err(|_| invalid_message)
}

/// Per-field validation messages. At least one field is set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.messages().collect::<Vec<_>>().join("; "))]
pub struct FieldErrors {
    pub sleep_time: Option<&'static str>,
    pub wake_time: Option<&'static str>,
}

impl FieldErrors {
    /// Messages in form order.
    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sleep_time.into_iter().chain(self.wake_time)
    }
}
