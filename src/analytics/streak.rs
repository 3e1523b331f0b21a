//! Streak and history statistics for a single habit
//!
//! Everything here works on period indices rather than raw timestamps:
//! completions are grouped by the index of the period they fall in, and a
//! period is successful when its group holds at least `frequency` entries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::progress::{current_period_progress, PeriodProgress};
use crate::analytics::PeriodClock;
use crate::calendar::Calendar;
use crate::domain::{Completion, EpochMillis, Habit};

/// Completions of one habit keyed by period index
pub type PeriodGroups<'a> = BTreeMap<i64, Vec<&'a Completion>>;

/// Current and best run of consecutive successful periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Everything the habit detail view shows, computed from one grouping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub progress: PeriodProgress,
    pub streaks: StreakSummary,
    pub fail_count: u32,
    pub record: u32,
    pub total_completions: u32,
    pub last_completed: Option<EpochMillis>,
}

/// Group the habit's completions by period index
pub fn completions_by_period<'a, C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &'a [Completion],
) -> PeriodGroups<'a> {
    let mut groups: PeriodGroups<'a> = BTreeMap::new();
    for completion in completions.iter().filter(|c| c.belongs_to(habit)) {
        groups
            .entry(clock.period_index(habit, completion.timestamp))
            .or_default()
            .push(completion);
    }
    groups
}

/// A period is successful once it holds at least `frequency` completions
pub fn is_period_successful(habit: &Habit, period_completions: &[&Completion]) -> bool {
    period_completions.len() >= habit.required() as usize
}

/// Calculate current and best streaks
///
/// The current streak counts successful periods walking back from the current
/// one, which means a current period that has not met its target yet leaves
/// the streak at zero. The best streak scans periods `0..=current`.
pub fn streaks<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
) -> StreakSummary {
    let groups = completions_by_period(clock, habit, completions);
    streaks_from_groups(habit, &groups, clock.current_period_index(habit))
}

/// Count finished periods (indices `0..current`) that missed their target
///
/// The current period never counts as a fail; it can still be completed.
pub fn fail_count<C: Calendar>(clock: &PeriodClock<C>, habit: &Habit, completions: &[Completion]) -> u32 {
    let groups = completions_by_period(clock, habit, completions);
    fail_count_from_groups(habit, &groups, clock.current_period_index(habit))
}

/// Largest number of completions ever logged in a single period
///
/// Not capped at the frequency.
pub fn record<C: Calendar>(clock: &PeriodClock<C>, habit: &Habit, completions: &[Completion]) -> u32 {
    let groups = completions_by_period(clock, habit, completions);
    record_from_groups(&groups)
}

/// Calculate all detail statistics for one habit
pub fn habit_stats<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
) -> HabitStats {
    let groups = completions_by_period(clock, habit, completions);
    let current = clock.current_period_index(habit);

    let total = groups.values().map(Vec::len).sum::<usize>();
    let last_completed = groups
        .values()
        .flatten()
        .map(|c| c.timestamp)
        .max();

    HabitStats {
        progress: current_period_progress(clock, habit, completions),
        streaks: streaks_from_groups(habit, &groups, current),
        fail_count: fail_count_from_groups(habit, &groups, current),
        record: record_from_groups(&groups),
        total_completions: u32::try_from(total).unwrap_or(u32::MAX),
        last_completed,
    }
}

// Helpers shared by the single-statistic functions and habit_stats
//
// Only indices that actually hold completions are visited, so the cost does
// not depend on how far back the anchor lies.

/// Successful period indices in `0..=current`, ascending
fn successful_indices(habit: &Habit, groups: &PeriodGroups<'_>, current: i64) -> Vec<i64> {
    if current < 0 {
        return Vec::new();
    }
    groups
        .range(0..=current)
        .filter(|(_, list)| is_period_successful(habit, list))
        .map(|(index, _)| *index)
        .collect()
}

fn streaks_from_groups(habit: &Habit, groups: &PeriodGroups<'_>, current: i64) -> StreakSummary {
    let successes = successful_indices(habit, groups, current);

    let current_streak = successes
        .iter()
        .rev()
        .zip((0..=current).rev())
        .take_while(|(index, expected)| **index == *expected)
        .count();

    let mut best_streak = 0u32;
    let mut run = 0u32;
    let mut previous: Option<i64> = None;
    for &index in &successes {
        run = match previous {
            Some(p) if p + 1 == index => run + 1,
            _ => 1,
        };
        best_streak = best_streak.max(run);
        previous = Some(index);
    }

    StreakSummary {
        current_streak: u32::try_from(current_streak).unwrap_or(u32::MAX),
        best_streak,
    }
}

fn fail_count_from_groups(habit: &Habit, groups: &PeriodGroups<'_>, current: i64) -> u32 {
    if current <= 0 {
        return 0;
    }
    let successes = successful_indices(habit, groups, current - 1).len() as i64;
    u32::try_from(current - successes).unwrap_or(u32::MAX)
}

fn record_from_groups(groups: &PeriodGroups<'_>) -> u32 {
    let best = groups.values().map(Vec::len).max().unwrap_or(0);
    u32::try_from(best).unwrap_or(u32::MAX)
}
