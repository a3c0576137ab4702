//! Persistence of the entry list over a key-value backend.
//!
//! The whole list lives in a single JSON blob under [`ENTRIES_KEY`], with the
//! time of the last save under [`LAST_UPDATED_KEY`]. Every save replaces both.
//!
//! Stored records that no longer parse are skipped on load but written back
//! unchanged after the readable entries, so a save never drops them. A blob
//! that is not a JSON array at all is copied to [`ENTRIES_BACKUP_KEY`] by the
//! next save before being replaced.

use std::collections::HashMap;
use std::convert::Infallible;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::entry::SleepEntry;

/// Key holding the serialized entry list.
pub const ENTRIES_KEY: &str = "dozyly-sleep-entries";

/// Key holding the RFC 3339 time of the last save.
pub const LAST_UPDATED_KEY: &str = "dozyly-last-updated";

/// Key receiving an unparseable entries blob before it is overwritten.
pub const ENTRIES_BACKUP_KEY: &str = "dozyly-sleep-entries-backup";

/// A string-to-string key-value backend.
pub trait Storage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Stores several pairs. Backends that can should apply them atomically.
    fn set_items(&mut self, items: &[(&str, &str)]) -> Result<(), Self::Error> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }
}

/// In-memory storage, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Errors raised while saving entries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entry list could not be encoded.
    #[error("failed to encode entries: {0}")]
    Encode(#[from] serde_json::Error),
    /// The storage backend rejected the write.
    #[error("storage write failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Loads and saves the entry list through a [`Storage`] backend.
#[derive(Debug, Clone, Default)]
pub struct EntryStore<S> {
    storage: S,
    /// Stored records that failed to parse, in stored order.
    unreadable: Vec<Value>,
    /// A blob that was not a JSON array, pending backup.
    corrupt: Option<String>,
}

/// Readable entries followed by the retained unreadable records.
struct Blob<'a> {
    entries: &'a [SleepEntry],
    unreadable: &'a [Value],
}

impl Serialize for Blob<'_> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len() + self.unreadable.len()))?;
        for entry in self.entries {
            seq.serialize_element(entry)?;
        }
        for record in self.unreadable {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl<S: Storage> EntryStore<S> {
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            unreadable: Vec::new(),
            corrupt: None,
        }
    }

    /// Loads the stored entries, newest first.
    ///
    /// Missing or unreadable data yields an empty list. Records that fail to
    /// parse are skipped and kept aside for the next save.
    pub fn load(&mut self) -> Vec<SleepEntry> {
        self.unreadable.clear();
        self.corrupt = None;

        let raw = match self.storage.get_item(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored entries");
                return Vec::new();
            }
        };

        let records: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "stored entries are not a JSON array");
                self.corrupt = Some(raw);
                return Vec::new();
            }
        };

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            match SleepEntry::deserialize(&record) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(error = %e, %record, "skipping unreadable stored entry");
                    self.unreadable.push(record);
                }
            }
        }
        entries
    }

    /// Stored records skipped by the last [`load`](Self::load).
    pub fn unreadable(&self) -> &[Value] {
        &self.unreadable
    }

    /// Persists the full list, stamping the save time as now.
    pub fn save(&mut self, entries: &[SleepEntry]) -> Result<(), StoreError> {
        self.save_at(entries, Utc::now())
    }

    /// Persists the full list with an explicit save time.
    pub fn save_at(&mut self, entries: &[SleepEntry], now: DateTime<Utc>) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&Blob {
            entries,
            unreadable: &self.unreadable,
        })?;
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut items = vec![(ENTRIES_KEY, blob.as_str()), (LAST_UPDATED_KEY, stamp.as_str())];
        if let Some(corrupt) = &self.corrupt {
            items.push((ENTRIES_BACKUP_KEY, corrupt.as_str()));
        }
        self.storage
            .set_items(&items)
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        if self.corrupt.take().is_some() {
            tracing::warn!(key = ENTRIES_BACKUP_KEY, "backed up unparseable entries");
        }
        tracing::debug!(
            count = entries.len(),
            retained = self.unreadable.len(),
            "saved entries"
        );
        Ok(())
    }

    /// When the list was last saved, if ever.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        let raw = self.storage.get_item(LAST_UPDATED_KEY).ok().flatten()?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    #[cfg(test)]
    const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, TimeZone};

    use crate::entry::Quality;
    use crate::types::EntryId;

    fn entry(id: &str, sleep: &str, wake: &str, quality: Quality) -> SleepEntry {
        SleepEntry::new(
            EntryId::new(id).unwrap(),
            sleep.parse().unwrap(),
            wake.parse().unwrap(),
            quality,
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().into(),
        )
    }

    #[test]
    fn load_from_empty_storage_is_empty() {
        let mut store = EntryStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
        assert_eq!(store.last_updated(), None);
    }

    #[test]
    fn save_then_load_returns_equal_entries() {
        let entries = vec![
            entry("b", "01:00", "09:30", Quality::Bad),
            entry("a", "23:00", "07:00", Quality::Good),
        ];
        let mut store = EntryStore::new(MemoryStorage::new());
        store.save(&entries).unwrap();

        assert_eq!(store.load(), entries);
    }

    #[test]
    fn save_stamps_last_updated() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 7, 30, 0).unwrap();
        let mut store = EntryStore::new(MemoryStorage::new());
        store.save_at(&[], now).unwrap();

        assert_eq!(store.last_updated(), Some(now));
        assert_eq!(
            store.storage().get_item(LAST_UPDATED_KEY).unwrap().as_deref(),
            Some("2026-10-18T07:30:00.000Z")
        );
        assert_eq!(
            store.storage().get_item(ENTRIES_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn corrupt_blob_loads_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ENTRIES_KEY, "{not json").unwrap();
        let mut store = EntryStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_blob_is_backed_up_by_next_save() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ENTRIES_KEY, "{not json").unwrap();
        let mut store = EntryStore::new(storage);
        assert!(store.load().is_empty());

        let fresh = [entry("a", "23:00", "07:00", Quality::Good)];
        store.save(&fresh).unwrap();

        assert_eq!(
            store.storage().get_item(ENTRIES_BACKUP_KEY).unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(store.load(), fresh);
    }

    #[test]
    fn unreadable_record_is_skipped_and_written_back() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                ENTRIES_KEY,
                r#"[{"id":"1","sleepTime":"22:00","wakeTime":"06:00","duration":8,"quality":"Good","date":"10/17/2026"},{"id":"2","sleepTime":"23:00","wakeTime":"07:00","duration":8,"quality":"Good","date":"18/10/2026"}]"#,
            )
            .unwrap();
        let mut store = EntryStore::new(storage);

        let mut entries = store.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "1");
        assert_eq!(store.unreadable().len(), 1);

        entries.insert(0, entry("new", "00:00", "08:00", Quality::Bad));
        store.save(&entries).unwrap();

        let raw = store.storage().get_item(ENTRIES_KEY).unwrap().unwrap();
        let stored: Vec<Value> = serde_json::from_str(&raw).unwrap();
        let ids: Vec<&str> = stored.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["new", "1", "2"]);
        assert_eq!(stored[2]["date"], "18/10/2026");
        assert_eq!(store.storage().get_item(ENTRIES_BACKUP_KEY).unwrap(), None);
    }

    #[test]
    fn blob_with_unknown_quality_loads_as_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                ENTRIES_KEY,
                r#"[{"id":"1","sleepTime":"22:00","wakeTime":"06:00","duration":8,"quality":"Okay","date":"2026-10-18"}]"#,
            )
            .unwrap();
        let mut store = EntryStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn loads_list_written_by_browser_client() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                ENTRIES_KEY,
                r#"[{"id":"1729230000000","sleepTime":"22:00","wakeTime":"06:00","duration":8,"quality":"Good","date":"10/18/2026"}]"#,
            )
            .unwrap();
        storage
            .set_item(LAST_UPDATED_KEY, "2026-10-18T05:40:00.000Z")
            .unwrap();
        let mut store = EntryStore::new(storage);

        let entries = store.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "1729230000000");
        assert!(store.last_updated().is_some());
    }
}
