//! Mood journal.
//!
//! Entries are kept in insertion order and persisted as one JSON list
//! under [`JOURNAL_KEY`] after every change.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::{self, KeyValueStore, StoreError};

/// Store key for journal entries.
pub const JOURNAL_KEY: &str = "journalEntries";

/// Mood attached to a journal entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Excited,
    #[default]
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Excited => "Excited",
            Mood::Neutral => "Neutral",
        }
    }
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub entry: String,
    pub date: DateTime<Utc>,
    pub mood: Mood,
}

/// Journal entries backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct Journal<S: KeyValueStore> {
    store: S,
    entries: Vec<JournalEntry>,
}

impl<S: KeyValueStore> Journal<S> {
    /// Loads the journal from `store`.
    ///
    /// Unreadable stored data is logged and treated as an empty journal;
    /// the next save overwrites it.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let entries = match store::load::<Vec<JournalEntry>, _>(&store, JOURNAL_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                warn!("Discarding unreadable journal: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { store, entries })
    }

    /// Adds an entry dated `date`.
    ///
    /// Blank text is ignored and returns `Ok(None)`.
    pub fn add(
        &mut self,
        text: &str,
        mood: Mood,
        date: DateTime<Utc>,
    ) -> Result<Option<Uuid>, StoreError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            entry: text.to_string(),
            date,
            mood,
        };
        let id = entry.id;
        self.entries.push(entry);
        self.persist()?;

        info!("Journal entry {} saved", id);
        Ok(Some(id))
    }

    /// Deletes the entry with `id`. Returns false if no entry matched.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };
        self.entries.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Entries in the order they were written.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Entries with the most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        store::save(&mut self.store, JOURNAL_KEY, &self.entries)
    }
}
