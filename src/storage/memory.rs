//! In-memory implementation of the habit store
//!
//! Records live in plain vectors in insertion order. The caller owns the
//! store value; there is no process-wide state.

use crate::domain::{Completion, CompletionId, Habit, HabitId, UserId};
use crate::storage::{HabitStore, StorageError};

/// Habit store held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    owner: UserId,
    habits: Vec<Habit>,
    completions: Vec<Completion>,
}

impl MemoryStore {
    /// Create an empty store for a user
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            habits: Vec::new(),
            completions: Vec::new(),
        }
    }

    /// Create a store from records loaded elsewhere
    ///
    /// Data is taken as-is. Completions whose habit is missing are kept, since
    /// historical data may already violate the ownership rule.
    pub fn from_parts(owner: UserId, habits: Vec<Habit>, completions: Vec<Completion>) -> Self {
        let orphans = completions
            .iter()
            .filter(|c| !habits.iter().any(|h| h.id == c.habit_id))
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "loaded completions that reference unknown habits");
        }

        Self {
            owner,
            habits,
            completions,
        }
    }

    /// Borrow all habits without cloning
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Borrow all completions without cloning
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    fn habit_position(&self, habit_id: &HabitId) -> Result<usize, StorageError> {
        self.habits
            .iter()
            .position(|h| &h.id == habit_id)
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn completion_position(&self, completion_id: &CompletionId) -> Result<usize, StorageError> {
        self.completions
            .iter()
            .position(|c| &c.id == completion_id)
            .ok_or_else(|| StorageError::CompletionNotFound {
                completion_id: completion_id.to_string(),
            })
    }
}

impl HabitStore for MemoryStore {
    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(self.habits.clone())
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let index = self.habit_position(habit_id)?;
        Ok(self.habits[index].clone())
    }

    fn create_habit(&mut self, habit: &Habit) -> Result<(), StorageError> {
        if self.habits.iter().any(|h| h.id == habit.id) {
            return Err(StorageError::DuplicateHabit {
                habit_id: habit.id.to_string(),
            });
        }

        self.habits.push(habit.clone());
        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn update_habit(&mut self, habit: &Habit) -> Result<(), StorageError> {
        let index = self.habit_position(&habit.id)?;
        self.habits[index] = habit.clone();
        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), StorageError> {
        let index = self.habit_position(habit_id)?;
        self.habits.remove(index);

        let before = self.completions.len();
        self.completions.retain(|c| &c.habit_id != habit_id);
        tracing::debug!(
            "Deleted habit {} and {} completions",
            habit_id,
            before - self.completions.len()
        );
        Ok(())
    }

    fn list_completions(&self, habit_id: Option<&HabitId>) -> Result<Vec<Completion>, StorageError> {
        Ok(self
            .completions
            .iter()
            .filter(|c| habit_id.map_or(true, |id| &c.habit_id == id))
            .cloned()
            .collect())
    }

    fn create_completion(&mut self, completion: &Completion) -> Result<(), StorageError> {
        self.habit_position(&completion.habit_id)?;
        if self.completions.iter().any(|c| c.id == completion.id) {
            return Err(StorageError::DuplicateCompletion {
                completion_id: completion.id.to_string(),
            });
        }

        self.completions.push(completion.clone());
        tracing::debug!("Created completion {} for habit {}", completion.id, completion.habit_id);
        Ok(())
    }

    fn update_completion(&mut self, completion: &Completion) -> Result<(), StorageError> {
        let index = self.completion_position(&completion.id)?;
        self.completions[index] = completion.clone();
        tracing::debug!("Updated completion {}", completion.id);
        Ok(())
    }

    fn delete_completion(&mut self, completion_id: &CompletionId) -> Result<Completion, StorageError> {
        let index = self.completion_position(completion_id)?;
        let removed = self.completions.remove(index);
        tracing::debug!("Deleted completion {}", completion_id);
        Ok(removed)
    }
}
