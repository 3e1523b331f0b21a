//! Habit entity and related functionality
//!
//! This module defines the core Habit struct that represents a recurring
//! target ("run 3 times per week"), along with the validated constructor and
//! update path used at the data-model boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EpochMillis, Frequency, HabitId, PeriodType};

/// A habit is something the user wants to do a number of times per period
///
/// Only `period_type`, `frequency` and the start/creation timestamps take part
/// in the period calculations; the remaining fields are descriptive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Optional detailed description
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form category name used for grouping
    #[serde(default)]
    pub category: Option<String>,
    /// Icon identifier chosen in the UI
    #[serde(default)]
    pub icon: Option<String>,
    /// Recurrence granularity
    pub period_type: PeriodType,
    /// Completions required per period
    #[schemars(with = "u32")]
    pub frequency: Frequency,
    /// Explicit start of the period sequence, falls back to `created_at`
    #[serde(default)]
    pub start_date: Option<EpochMillis>,
    /// When this habit was created
    pub created_at: EpochMillis,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<EpochMillis>,
}

/// Input for creating a habit
///
/// Raw values as they arrive from a form or API body; `Habit::new` parses and
/// validates them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub period_type: String,
    pub frequency: u32,
    #[serde(default)]
    pub start_date: Option<EpochMillis>,
}

/// Partial update of a habit
///
/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub period_type: Option<PeriodType>,
    pub frequency: Option<u32>,
    pub start_date: Option<Option<EpochMillis>>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// `now` becomes both the creation and the last-update time.
    pub fn new(params: NewHabit, now: EpochMillis) -> Result<Self, DomainError> {
        Self::validate_name(&params.name)?;
        Self::validate_description(&params.description)?;
        let period_type: PeriodType = params.period_type.parse()?;
        let frequency = Frequency::new(params.frequency)?;

        Ok(Self {
            id: HabitId::new(),
            name: params.name.trim().to_string(),
            description: params.description,
            category: params.category,
            icon: params.icon,
            period_type,
            frequency,
            start_date: params.start_date,
            created_at: now,
            updated_at: Some(now),
        })
    }

    /// Create a habit from existing data (used by stores and tests)
    ///
    /// Assumes the data was validated when it was first written.
    pub fn from_existing(
        id: HabitId,
        name: impl Into<String>,
        period_type: PeriodType,
        frequency: Frequency,
        start_date: Option<EpochMillis>,
        created_at: EpochMillis,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category: None,
            icon: None,
            period_type,
            frequency,
            start_date,
            created_at,
            updated_at: None,
        }
    }

    /// Apply a partial update with validation
    ///
    /// Nothing is changed if any of the new values is invalid.
    pub fn update(&mut self, update: HabitUpdate, now: EpochMillis) -> Result<(), DomainError> {
        if let Some(ref new_name) = update.name {
            Self::validate_name(new_name)?;
        }
        if let Some(ref new_desc) = update.description {
            Self::validate_description(new_desc)?;
        }
        let frequency = update.frequency.map(Frequency::new).transpose()?;

        if let Some(new_type) = update.period_type {
            if new_type != self.period_type {
                // Every stored completion now maps onto different period indices.
                tracing::info!(
                    habit_id = %self.id,
                    from = %self.period_type,
                    to = %new_type,
                    "period type changed, historical periods are re-indexed"
                );
                self.period_type = new_type;
            }
        }
        if let Some(new_name) = update.name {
            self.name = new_name.trim().to_string();
        }
        if let Some(new_description) = update.description {
            self.description = new_description;
        }
        if let Some(new_category) = update.category {
            self.category = new_category;
        }
        if let Some(new_icon) = update.icon {
            self.icon = new_icon;
        }
        if let Some(new_frequency) = frequency {
            self.frequency = new_frequency;
        }
        if let Some(new_start) = update.start_date {
            self.start_date = new_start;
        }
        self.updated_at = Some(now);

        Ok(())
    }

    /// Timestamp the period sequence is anchored on (`start_date` or `created_at`)
    pub fn anchor_source(&self) -> EpochMillis {
        self.start_date.unwrap_or(self.created_at)
    }

    /// Earliest instant a completion may be recorded for
    ///
    /// A back-dated `start_date` widens the window beyond `created_at`.
    pub fn lifetime_start(&self) -> EpochMillis {
        match self.start_date {
            Some(start) => start.min(self.created_at),
            None => self.created_at,
        }
    }

    /// Required completions per period as a plain integer
    pub fn required(&self) -> u32 {
        self.frequency.get()
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate optional description
    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.chars().count() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}
