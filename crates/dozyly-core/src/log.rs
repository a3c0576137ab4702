//! The in-memory sleep log mirrored to an [`EntryStore`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entry::SleepEntry;
use crate::form::{FieldErrors, SleepForm};
use crate::store::{EntryStore, Storage, StoreError};
use crate::types::{EntryDate, EntryId};

/// Errors from mutating the log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The form failed validation; nothing was added.
    #[error("invalid sleep entry: {0}")]
    Validation(#[from] FieldErrors),
    /// The change could not be persisted; the log is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Entries held newest first, saved in full after every change.
#[derive(Debug)]
pub struct SleepLog<S> {
    store: EntryStore<S>,
    entries: Vec<SleepEntry>,
}

impl<S: Storage> SleepLog<S> {
    /// Opens the log, loading whatever the storage holds.
    pub fn open(storage: S) -> Self {
        let mut store = EntryStore::new(storage);
        let entries = store.load();
        tracing::debug!(
            count = entries.len(),
            unreadable = store.unreadable().len(),
            "loaded sleep log"
        );
        Self { store, entries }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the log was last saved, if ever.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.store.last_updated()
    }

    /// Validates `form`, then prepends and persists a new entry logged on `today`.
    pub fn add(&mut self, form: &SleepForm, today: EntryDate) -> Result<&SleepEntry, LogError> {
        let entry = form.build(EntryId::generate(), today)?;
        self.insert(entry)
    }

    /// Prepends a fully-built entry and persists the list.
    pub fn insert(&mut self, entry: SleepEntry) -> Result<&SleepEntry, LogError> {
        let mut updated = Vec::with_capacity(self.entries.len() + 1);
        updated.push(entry);
        updated.extend(self.entries.iter().cloned());

        self.store.save(&updated)?;
        tracing::debug!(id = %updated[0].id, "added sleep entry");
        self.entries = updated;
        Ok(&self.entries[0])
    }

    /// Removes the entry with `id`, keeping the rest in order.
    ///
    /// Returns the removed entry, or `None` (without saving) if no entry matched.
    pub fn delete(&mut self, id: &EntryId) -> Result<Option<SleepEntry>, LogError> {
        let Some(index) = self.entries.iter().position(|entry| &entry.id == id) else {
            return Ok(None);
        };

        let mut updated = self.entries.clone();
        let removed = updated.remove(index);
        self.store.save(&updated)?;
        tracing::debug!(%id, "deleted sleep entry");
        self.entries = updated;
        Ok(Some(removed))
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}
