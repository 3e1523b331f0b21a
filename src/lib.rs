//! Public library interface for the habit period engine
//!
//! The engine answers "how is this habit doing" at a pinned instant: period
//! bounds, progress, streaks, fail counts and range aggregations. Around it
//! sit a caller-owned `HabitTracker` that applies the editing rules against a
//! `HabitStore`, a small configuration layer and a plain-text report renderer.

use thiserror::Error;

pub mod analytics;
pub mod calendar;
pub mod config;
pub mod domain;
pub mod report;
pub mod storage;

// Re-export public modules and types
pub use analytics::{AnalyticsEngine, DashboardQuery, DashboardReport, DayGroup, HabitStats, PeriodClock};
pub use calendar::{Calendar, ZonedCalendar};
pub use config::{ConfigError, EngineConfig};
pub use domain::*;
pub use storage::{HabitStore, MemoryStore, Snapshot, StorageError};

/// Errors raised by tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Completion for habit {habit_id} is outside its current period")]
    OutsideCurrentPeriod { habit_id: String },

    #[error("Habit {habit_id} already has {required} completions this period")]
    PeriodComplete { habit_id: String, required: u32 },
}

/// Caller-owned habit tracker
///
/// Holds the store and the calendar; every operation takes the instant it is
/// evaluated at, so no hidden clock is read.
pub struct HabitTracker<S: HabitStore, C: Calendar> {
    store: S,
    calendar: C,
}

impl<S: HabitStore, C: Calendar> HabitTracker<S, C> {
    /// Create a tracker over an existing store
    pub fn new(store: S, calendar: C) -> Self {
        match store.list_habits() {
            Ok(habits) => tracing::info!(
                "Initializing habit tracker for user {} with {} habits",
                store.owner(),
                habits.len()
            ),
            Err(e) => tracing::warn!(
                "Initializing habit tracker for user {}, store is not readable: {}",
                store.owner(),
                e
            ),
        }
        Self { store, calendar }
    }

    /// Analytics engine pinned to `now`
    pub fn engine_at(&self, now: EpochMillis) -> AnalyticsEngine<&C> {
        AnalyticsEngine::new(&self.calendar, now)
    }

    /// Create a habit from raw input
    pub fn create_habit(&mut self, params: NewHabit, now: EpochMillis) -> Result<Habit, TrackerError> {
        let habit = Habit::new(params, now)?;
        self.store.create_habit(&habit)?;
        tracing::info!("Created habit '{}' ({})", habit.name, habit.id);
        Ok(habit)
    }

    /// Apply a partial update to a habit
    pub fn update_habit(
        &mut self,
        habit_id: &HabitId,
        update: HabitUpdate,
        now: EpochMillis,
    ) -> Result<Habit, TrackerError> {
        let mut habit = self.store.get_habit(habit_id)?;
        habit.update(update, now)?;
        self.store.update_habit(&habit)?;
        Ok(habit)
    }

    /// Delete a habit and all of its completions
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), TrackerError> {
        self.store.delete_habit(habit_id)?;
        tracing::info!("Deleted habit {}", habit_id);
        Ok(())
    }

    /// Record that a habit was done at `at`
    ///
    /// Only the current period can be marked, and only until it holds
    /// `frequency` completions.
    pub fn mark_done(
        &mut self,
        habit_id: &HabitId,
        at: EpochMillis,
        now: EpochMillis,
    ) -> Result<Completion, TrackerError> {
        let habit = self.store.get_habit(habit_id)?;
        let completion = Completion::new(&habit, at, now)?;

        let engine = self.engine_at(now);
        if !engine.clock().is_in_current_period(&habit, at) {
            return Err(TrackerError::OutsideCurrentPeriod {
                habit_id: habit_id.to_string(),
            });
        }

        let existing = self.store.list_completions(Some(habit_id))?;
        let progress = engine.current_period_progress(&habit, &existing);
        if progress.is_done() {
            return Err(TrackerError::PeriodComplete {
                habit_id: habit_id.to_string(),
                required: progress.required,
            });
        }

        self.store.create_completion(&completion)?;
        tracing::debug!(
            "Marked habit {} done ({}/{})",
            habit_id,
            progress.value + 1,
            progress.required
        );
        Ok(completion)
    }

    /// Remove the latest completion of the current period
    ///
    /// Returns `None` when the current period has no completion to undo.
    pub fn undo_last_completion(
        &mut self,
        habit_id: &HabitId,
        now: EpochMillis,
    ) -> Result<Option<Completion>, TrackerError> {
        let habit = self.store.get_habit(habit_id)?;
        let bounds = self.engine_at(now).period_bounds(&habit);

        let latest = self
            .store
            .list_completions(Some(habit_id))?
            .into_iter()
            .filter(|c| bounds.contains(c.timestamp))
            .max_by_key(|c| c.timestamp);

        match latest {
            Some(completion) => Ok(Some(self.store.delete_completion(&completion.id)?)),
            None => Ok(None),
        }
    }

    /// Move a completion to a different timestamp
    pub fn edit_completion(
        &mut self,
        completion_id: &CompletionId,
        timestamp: EpochMillis,
        now: EpochMillis,
    ) -> Result<Completion, TrackerError> {
        let mut completion = self
            .store
            .list_completions(None)?
            .into_iter()
            .find(|c| &c.id == completion_id)
            .ok_or_else(|| StorageError::CompletionNotFound {
                completion_id: completion_id.to_string(),
            })?;

        let habit = self.store.get_habit(&completion.habit_id)?;
        Completion::validate_timestamp(&habit, timestamp, now)?;

        completion.timestamp = timestamp;
        self.store.update_completion(&completion)?;
        Ok(completion)
    }

    /// Detail statistics for one habit
    pub fn habit_stats(&self, habit_id: &HabitId, now: EpochMillis) -> Result<HabitStats, TrackerError> {
        let habit = self.store.get_habit(habit_id)?;
        let completions = self.store.list_completions(Some(habit_id))?;

        let outside = completions
            .iter()
            .filter(|c| c.timestamp < habit.lifetime_start() || c.timestamp > now)
            .count();
        if outside > 0 {
            tracing::warn!(
                habit_id = %habit.id,
                outside,
                "completions recorded outside the habit's lifetime"
            );
        }

        Ok(self.engine_at(now).habit_stats(&habit, &completions))
    }

    /// Completion history of one habit, optionally limited to recent days
    pub fn completion_history(
        &self,
        habit_id: &HabitId,
        now: EpochMillis,
        cutoff_days: Option<u32>,
    ) -> Result<Vec<DayGroup>, TrackerError> {
        let habit = self.store.get_habit(habit_id)?;
        let completions = self.store.list_completions(Some(habit_id))?;
        Ok(self.engine_at(now).completion_history(&habit, &completions, cutoff_days))
    }

    /// Dashboard report over every habit in the store
    pub fn dashboard(&self, now: EpochMillis, query: &DashboardQuery) -> Result<DashboardReport, TrackerError> {
        let habits = self.store.list_habits()?;
        let completions = self.store.list_completions(None)?;
        Ok(self.engine_at(now).dashboard(&habits, &completions, query))
    }

    /// Get a reference to the store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Give the store back, e.g. to export a snapshot
    pub fn into_store(self) -> S {
        self.store
    }
}
