//! JSON snapshot of one user's habits and completions
//!
//! The snapshot is the import/export format of the store. Fields use the
//! same camelCase names as the records themselves, and missing arrays are
//! read as empty.

use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Completion, Habit, UserId};
use crate::storage::{HabitStore, MemoryStore, StorageError};

/// Serialized form of a store's contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Owner of the records, if the exporter recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            habits = snapshot.habits.len(),
            completions = snapshot.completions.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        tracing::debug!(path = %path.display(), "saved snapshot");
        Ok(())
    }

    /// Export everything a store holds
    pub fn from_store<S: HabitStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        Ok(Self {
            user_id: Some(store.owner().clone()),
            habits: store.list_habits()?,
            completions: store.list_completions(None)?,
        })
    }

    /// Build a memory store from the snapshot
    ///
    /// `fallback_owner` is used when the snapshot does not name its user.
    pub fn into_store(self, fallback_owner: UserId) -> MemoryStore {
        let owner = self.user_id.unwrap_or(fallback_owner);
        MemoryStore::from_parts(owner, self.habits, self.completions)
    }

    /// JSON schema describing the snapshot file
    pub fn json_schema() -> Result<String, StorageError> {
        let schema = schemars::schema_for!(Snapshot);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
