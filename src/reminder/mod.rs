//! Workout reminders.
//!
//! Only the reminder list is kept here; delivering a notification at
//! the reminder time is left to the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::{self, KeyValueStore, StoreError};

/// Store key for reminders.
pub const REMINDERS_KEY: &str = "reminders";

/// Errors from reminder operations.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Reminders must be set for a future time.
    #[error("reminder time {0} is not in the future")]
    InPast(DateTime<Utc>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One scheduled reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderItem {
    pub id: String,
    pub date: DateTime<Utc>,
}

/// Reminder list backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct Reminders<S: KeyValueStore> {
    store: S,
    items: Vec<ReminderItem>,
}

impl<S: KeyValueStore> Reminders<S> {
    /// Loads reminders from `store`; unreadable data starts an empty list.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let items = match store::load::<Vec<ReminderItem>, _>(&store, REMINDERS_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                warn!("Discarding unreadable reminders: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { store, items })
    }

    /// Adds a reminder for `date`, which must be after `now`.
    pub fn add(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) -> Result<String, ReminderError> {
        if date <= now {
            return Err(ReminderError::InPast(date));
        }

        let item = ReminderItem {
            id: Uuid::new_v4().to_string(),
            date,
        };
        let id = item.id.clone();
        self.items.push(item);
        self.persist()?;

        info!("Reminder {} set for {}", id, date);
        Ok(id)
    }

    /// Deletes the reminder with `id`. Returns false if none matched.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Reminders in the order they were added.
    pub fn items(&self) -> &[ReminderItem] {
        &self.items
    }

    /// Reminders still ahead of `now`.
    pub fn upcoming(&self, now: DateTime<Utc>) -> impl Iterator<Item = &ReminderItem> {
        self.items.iter().filter(move |item| item.date > now)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        store::save(&mut self.store, REMINDERS_KEY, &self.items)
    }
}
