//! Storage layer: the collaborator that owns habit and completion records
//!
//! The engine never persists anything. This module defines the interface the
//! surrounding application exposes (`HabitStore`), an in-process
//! implementation scoped to one user (`MemoryStore`), and a JSON snapshot
//! format for importing or exporting a user's data.

pub mod memory;
pub mod snapshot;

// Re-export the main storage types
pub use memory::*;
pub use snapshot::*;

use thiserror::Error;

use crate::domain::{Completion, CompletionId, Habit, HabitId, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Completion not found: {completion_id}")]
    CompletionNotFound { completion_id: String },

    #[error("Duplicate habit: {habit_id} already exists")]
    DuplicateHabit { habit_id: String },

    #[error("Duplicate completion: {completion_id} already exists")]
    DuplicateCompletion { completion_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait defining the CRUD interface of the habit data store
///
/// A store instance holds the records of a single user. Implementations may
/// sit in front of any database or API; the engine only reads what they
/// return.
pub trait HabitStore {
    /// Identity whose records this store holds
    fn owner(&self) -> &UserId;

    /// List all habits
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Create a new habit
    fn create_habit(&mut self, habit: &Habit) -> Result<(), StorageError>;

    /// Replace an existing habit
    fn update_habit(&mut self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit together with all of its completions
    fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// List completions of one habit, or of every habit when `None`
    fn list_completions(&self, habit_id: Option<&HabitId>) -> Result<Vec<Completion>, StorageError>;

    /// Create a new completion
    fn create_completion(&mut self, completion: &Completion) -> Result<(), StorageError>;

    /// Replace an existing completion
    fn update_completion(&mut self, completion: &Completion) -> Result<(), StorageError>;

    /// Delete a completion, returning the removed record
    fn delete_completion(&mut self, completion_id: &CompletionId) -> Result<Completion, StorageError>;
}
