//! Completion entity for recording that a habit was done
//!
//! A completion is a single timestamped event owned by exactly one habit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionId, DomainError, EpochMillis, Habit, HabitId};

/// A record of doing a habit once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Unique identifier for this completion
    pub id: CompletionId,
    /// Which habit this completion belongs to
    pub habit_id: HabitId,
    /// When the habit was marked done
    pub timestamp: EpochMillis,
}

impl Completion {
    /// Create a new completion with validation
    ///
    /// The timestamp may not lie in the future and may not precede the
    /// habit's lifetime.
    pub fn new(habit: &Habit, timestamp: EpochMillis, now: EpochMillis) -> Result<Self, DomainError> {
        Self::validate_timestamp(habit, timestamp, now)?;

        Ok(Self {
            id: CompletionId::new(),
            habit_id: habit.id.clone(),
            timestamp,
        })
    }

    /// Create a completion from existing data (used by stores and tests)
    pub fn from_existing(id: CompletionId, habit_id: HabitId, timestamp: EpochMillis) -> Self {
        Self {
            id,
            habit_id,
            timestamp,
        }
    }

    /// Check if this completion belongs to the given habit
    pub fn belongs_to(&self, habit: &Habit) -> bool {
        self.habit_id == habit.id
    }

    /// Validate a new or edited timestamp for a habit
    pub fn validate_timestamp(
        habit: &Habit,
        timestamp: EpochMillis,
        now: EpochMillis,
    ) -> Result<(), DomainError> {
        if timestamp > now {
            return Err(DomainError::InvalidTimestamp(
                "Timestamp cannot be in the future".to_string(),
            ));
        }

        if timestamp < habit.lifetime_start() {
            return Err(DomainError::InvalidTimestamp(
                "Timestamp cannot be earlier than when the habit was created".to_string(),
            ));
        }

        Ok(())
    }
}
