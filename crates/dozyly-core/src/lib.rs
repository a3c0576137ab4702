//! Core domain logic for the Dozyly sleep tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: logged sleep sessions and the overnight duration rule
//! - Storage: the entry list persisted over a key-value backend
//! - Statistics: windowed averages and the recent good-sleep rate
//! - Suggestions: static tips selected from recent quality history
//! - Charts: bar series handed to an external renderer

pub mod chart;
mod entry;
mod form;
mod log;
pub mod stats;
pub mod store;
pub mod suggest;
mod types;

pub use chart::{BarColor, BarDetail, ChartData};
pub use entry::{Quality, SleepEntry, duration_hours, round_to_hundredths};
pub use form::{FieldErrors, SleepForm};
pub use log::{LogError, SleepLog};
pub use stats::{RecentQuality, WindowStats};
pub use store::{EntryStore, MemoryStorage, Storage, StoreError};
pub use suggest::{Category, Icon, Suggestion};
pub use types::{EntryDate, EntryId, TimeOfDay, ValidationError};
