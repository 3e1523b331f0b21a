//! Fixtures shared by the unit tests

use habit_period_engine::{Completion, CompletionId, EpochMillis, Frequency, Habit, HabitId, PeriodType};

pub const HOUR: i64 = 3_600_000;
pub const DAY: i64 = 24 * HOUR;
/// 2024-01-01T00:00:00Z, a Monday
pub const JAN_1: i64 = 1_704_067_200_000;

pub fn habit(id: &str, period_type: PeriodType, frequency: u32, created_at: EpochMillis) -> Habit {
    Habit::from_existing(
        HabitId::from(id),
        id,
        period_type,
        Frequency::new(frequency).unwrap(),
        None,
        created_at,
    )
}

/// Completion at 10:00 UTC on the given day offset from Jan 1
pub fn done_on(habit_id: &str, day: i64) -> Completion {
    Completion::from_existing(CompletionId::new(), HabitId::from(habit_id), JAN_1 + day * DAY + 10 * HOUR)
}

pub fn done_on_days(habit_id: &str, days: &[i64]) -> Vec<Completion> {
    days.iter().map(|d| done_on(habit_id, *d)).collect()
}

/// Noon UTC on the given day offset from Jan 1
pub fn noon(day: i64) -> EpochMillis {
    JAN_1 + day * DAY + 12 * HOUR
}
