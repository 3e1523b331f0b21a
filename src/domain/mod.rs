//! Domain module containing core data types
//!
//! This module defines the records the engine reads (Habit, Completion), the
//! derived intervals it produces (Period, TimeRange) and the validation
//! rules enforced when records are created or edited.

pub mod completion;
pub mod habit;
pub mod period;
pub mod types;

// Re-export public types for easy access
pub use completion::*;
pub use habit::*;
pub use period::*;
pub use types::*;

use thiserror::Error;

/// Errors raised when input fails validation at the data-model boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid period type: {0}")]
    InvalidPeriodType(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
