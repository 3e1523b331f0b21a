//! Progress toward the target of the period currently in progress

use serde::Serialize;

use crate::analytics::PeriodClock;
use crate::calendar::Calendar;
use crate::domain::{Completion, Habit};

/// How far the current period is toward its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodProgress {
    /// Completions counted this period, capped at `required`
    pub value: u32,
    /// Completions the period needs (the habit's frequency)
    pub required: u32,
    /// `value / required`, between 0 and 1
    pub ratio: f64,
}

impl PeriodProgress {
    /// The current period has reached its target
    pub fn is_done(&self) -> bool {
        self.value >= self.required
    }
}

/// Count the habit's completions in the current period
///
/// Extra completions beyond the frequency stay in the data but do not push
/// progress past 100%.
pub fn current_period_progress<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
) -> PeriodProgress {
    let bounds = clock.period_bounds(habit);
    let raw = completions
        .iter()
        .filter(|c| c.belongs_to(habit) && bounds.contains(c.timestamp))
        .count();

    let required = habit.required();
    let value = u32::try_from(raw).unwrap_or(u32::MAX).min(required);

    PeriodProgress {
        value,
        required,
        ratio: (f64::from(value) / f64::from(required)).min(1.0),
    }
}
