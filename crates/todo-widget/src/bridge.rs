//! Mirrors the task list into key/value storage.
//!
//! The stored value is the whole collection serialized as a JSON array and
//! is overwritten after every applied change.

use crate::error::StorageError;
use crate::seed::SeedSource;
use crate::state::{Action, TaskList};
use crate::storage::KeyValueStorage;
use crate::task::Task;

pub const STORAGE_KEY: &str = "todos";

pub struct PersistenceBridge {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl PersistenceBridge {
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Reads the stored collection.
    ///
    /// Content that does not decode as a task array is logged and reported as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage itself cannot be read.
    pub fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Ok(Some(tasks)),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Ignoring corrupt stored tasks");
                Ok(None)
            }
        }
    }

    /// Overwrites the stored collection with `list`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when serialization or the write fails.
    pub fn persist(&mut self, list: &TaskList) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(list.tasks())?;
        self.storage.set(&self.key, &serialized)?;
        tracing::debug!(key = %self.key, version = list.version(), "Persisted tasks");
        Ok(())
    }

    /// Builds the initial list from storage, falling back to `seed`.
    ///
    /// A seeded list is persisted immediately. A failed seed is logged and
    /// yields an empty list without touching storage, so a later start
    /// seeds again.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read or the seeded
    /// list cannot be written.
    pub async fn initialize(
        &mut self,
        seed: &dyn SeedSource,
        seed_limit: usize,
    ) -> Result<TaskList, StorageError> {
        let mut list = TaskList::new();

        if let Some(tasks) = self.load()? {
            tracing::debug!(count = tasks.len(), "Loaded tasks from storage");
            list.apply(Action::Replace(tasks));
            return Ok(list);
        }

        match seed.fetch(seed_limit).await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "Seeded tasks from feed");
                list.apply(Action::Replace(tasks));
                self.persist(&list)?;
            }
            Err(error) => {
                tracing::warn!(%error, "Could not seed tasks; starting empty");
            }
        }

        Ok(list)
    }
}

// =============================================================================
// Tests
// =============================================================================
