//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A time-of-day value was not in `HH:MM` form.
    #[error("invalid time of day: {value} (expected HH:MM)")]
    InvalidTime { value: String },

    /// A calendar date could not be parsed.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },

    /// A quality label outside the closed set.
    #[error("unknown sleep quality: {value}")]
    UnknownQuality { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated sleep entry identifier.
    ///
    /// Entry IDs are opaque, non-empty strings. New IDs are time-ordered UUIDs;
    /// older stores may hold millisecond timestamps, which are accepted as-is.
    EntryId, "entry ID"
);

impl EntryId {
    /// Generates a fresh, timestamp-derived ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

/// A wall-clock time of day with minute precision.
///
/// Serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Minutes elapsed since midnight.
    #[must_use]
    pub fn minutes_from_midnight(self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts single-digit fields; require the zero-padded form
        if trimmed.len() != 5 {
            return Err(ValidationError::InvalidTime {
                value: s.to_string(),
            });
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| ValidationError::InvalidTime {
                value: s.to_string(),
            })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The calendar day an entry was logged on.
///
/// Serialized as `YYYY-MM-DD`. The US locale form `M/D/YYYY` is accepted on
/// input so stores written by the browser client still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for EntryDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: s.to_string(),
            })
    }
}

impl Serialize for EntryDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
