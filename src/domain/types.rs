//! Core types and enums used throughout the domain layer
//!
//! This module defines identifiers, the closed `PeriodType` enumeration and
//! the validated `Frequency` used by `Habit`, `Completion` and the engine.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Instant in time as milliseconds since the Unix epoch (UTC)
pub type EpochMillis = i64;

/// Unique identifier for a habit
///
/// Identifiers are opaque strings handed out by the collaborator store.
/// Wrapping them keeps a habit ID from being passed where a completion ID
/// is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a completion record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CompletionId(pub String);

impl CompletionId {
    /// Generate a new random completion ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CompletionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for CompletionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identity of the user owning a set of habits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recurrence granularity of a habit
///
/// This is a closed set: strings other than `daily`, `weekly` and `monthly`
/// are rejected when parsing or deserializing, so the period math never has
/// to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// One period per local calendar day
    Daily,
    /// Rolling 7-day periods counted from the habit's anchor day
    Weekly,
    /// One period per local calendar month
    Monthly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Daily => "daily",
            PeriodType::Weekly => "weekly",
            PeriodType::Monthly => "monthly",
        }
    }

    /// Human title ("Daily", "Weekly", "Monthly")
    pub fn title(&self) -> &'static str {
        match self {
            PeriodType::Daily => "Daily",
            PeriodType::Weekly => "Weekly",
            PeriodType::Monthly => "Monthly",
        }
    }

    /// Singular unit used in streak labels ("3 weeks")
    pub fn unit(&self) -> &'static str {
        match self {
            PeriodType::Daily => "day",
            PeriodType::Weekly => "week",
            PeriodType::Monthly => "month",
        }
    }

    /// Label for the period that is currently in progress
    pub fn current_label(&self) -> &'static str {
        match self {
            PeriodType::Daily => "Today",
            PeriodType::Weekly => "This week",
            PeriodType::Monthly => "This month",
        }
    }

    /// One-based label of a period index ("Day 3", "Week 1", "Month 12")
    pub fn period_label(&self, index: i64) -> String {
        let noun = match self {
            PeriodType::Daily => "Day",
            PeriodType::Weekly => "Week",
            PeriodType::Monthly => "Month",
        };
        format!("{} {}", noun, index.saturating_add(1))
    }
}

impl FromStr for PeriodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(PeriodType::Daily),
            "weekly" => Ok(PeriodType::Weekly),
            "monthly" => Ok(PeriodType::Monthly),
            _ => Err(DomainError::InvalidPeriodType(format!(
                "'{}' (valid options: daily, weekly, monthly)",
                s
            ))),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of completions a period needs to count as successful
///
/// Always at least 1; a zero target cannot be constructed or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Frequency(NonZeroU32);

impl Frequency {
    /// Validate and wrap a raw target count
    pub fn new(times: u32) -> Result<Self, DomainError> {
        NonZeroU32::new(times).map(Self).ok_or_else(|| {
            DomainError::InvalidFrequency("Frequency must be at least 1".to_string())
        })
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Frequency {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Frequency> for u32 {
    fn from(value: Frequency) -> Self {
        value.get()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
