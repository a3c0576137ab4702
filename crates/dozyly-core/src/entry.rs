//! Logged sleep sessions and the duration rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{EntryDate, EntryId, TimeOfDay, ValidationError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Subjective rating of a night's sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Good,
    Bad,
    Interrupted,
}

impl Quality {
    /// Every quality, in form order.
    pub const ALL: [Self; 3] = [Self::Good, Self::Bad, Self::Interrupted];

    /// Label used in storage and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Interrupted => "Interrupted",
        }
    }

    /// Whether this rating counts toward "needs improvement".
    #[must_use]
    pub const fn needs_improvement(self) -> bool {
        matches!(self, Self::Bad | Self::Interrupted)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "bad" => Ok(Self::Bad),
            "interrupted" => Ok(Self::Interrupted),
            _ => Err(ValidationError::UnknownQuality {
                value: s.to_string(),
            }),
        }
    }
}

/// One logged sleep session.
///
/// Entries are immutable once built; `duration` is always derived from the
/// two times via [`duration_hours`], including when read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEntry")]
pub struct SleepEntry {
    pub id: EntryId,
    pub sleep_time: TimeOfDay,
    pub wake_time: TimeOfDay,
    duration: f64,
    pub quality: Quality,
    /// Day the entry was logged (not necessarily the night slept).
    pub date: EntryDate,
}

impl SleepEntry {
    /// Builds an entry, deriving its duration from the two times.
    pub fn new(
        id: EntryId,
        sleep_time: TimeOfDay,
        wake_time: TimeOfDay,
        quality: Quality,
        date: EntryDate,
    ) -> Self {
        Self {
            id,
            sleep_time,
            wake_time,
            duration: duration_hours(sleep_time, wake_time),
            quality,
            date,
        }
    }

    /// Hours slept, rounded to two decimals.
    pub const fn duration(&self) -> f64 {
        self.duration
    }
}

/// A stored record; any stored `duration` is ignored and re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: EntryId,
    sleep_time: TimeOfDay,
    wake_time: TimeOfDay,
    quality: Quality,
    date: EntryDate,
}

impl From<StoredEntry> for SleepEntry {
    fn from(stored: StoredEntry) -> Self {
        Self::new(
            stored.id,
            stored.sleep_time,
            stored.wake_time,
            stored.quality,
            stored.date,
        )
    }
}

/// Hours between falling asleep and waking, rounded to two decimals.
///
/// A wake time at or before the sleep time is taken to fall on the next day,
/// so equal times yield a full 24 hours.
pub fn duration_hours(sleep: TimeOfDay, wake: TimeOfDay) -> f64 {
    let sleep_min = sleep.minutes_from_midnight();
    let mut wake_min = wake.minutes_from_midnight();
    if wake_min <= sleep_min {
        wake_min += MINUTES_PER_DAY;
    }
    round_to_hundredths(f64::from(wake_min - sleep_min) / 60.0)
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
