//! Scheduled, completed and missed counts over arbitrary reporting windows
//!
//! A window rarely lines up with a habit's periods. Every period that shares
//! at least one instant with the window is counted in full: it contributes
//! the whole frequency to `scheduled`, with no pro-rating for the part that
//! lies outside the window.
//!
//! The completion rate has one canonical definition in this crate:
//! `completed / (completed + misses)`. Periods that have not finished yet
//! produce no misses, so an in-progress period does not drag the rate down.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::streak::completions_by_period;
use crate::analytics::PeriodClock;
use crate::calendar::{add_days, Calendar};
use crate::domain::{Completion, Habit, Period, TimeRange};

/// Scheduled versus completed totals for one habit in a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeTally {
    /// Sum of the frequency of every overlapping period
    pub scheduled: u64,
    /// Completions in overlapping periods, capped per period at the frequency
    pub completed: u64,
}

impl RangeTally {
    pub fn add(&mut self, other: RangeTally) {
        self.scheduled += other.scheduled;
        self.completed += other.completed;
    }
}

/// Day-granularity streaks across all habits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverallStreaks {
    pub current: u32,
    pub longest: u32,
}

/// Count scheduled and completed slots for a habit in a window
pub fn scheduled_and_completed_in_range<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
    range: TimeRange,
) -> RangeTally {
    let groups = completions_by_period(clock, habit, completions);
    let required = u64::from(habit.required());

    let mut tally = RangeTally::default();
    for period in overlapping_periods(clock, habit, range) {
        let count = groups.get(&period.index).map_or(0, Vec::len) as u64;
        tally.scheduled += required;
        tally.completed += count.min(required);
    }
    tally
}

/// Count missed completions for a habit in a window
///
/// Only finished periods can miss, and periods that ended before the habit
/// started are not held against it.
pub fn misses_in_range<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
    range: TimeRange,
) -> u64 {
    let groups = completions_by_period(clock, habit, completions);
    let required = u64::from(habit.required());
    let habit_start = clock.calendar().start_of_day(habit.anchor_source());

    overlapping_periods(clock, habit, range)
        .filter(|period| period.end <= clock.now())
        .filter(|period| period.end > habit_start)
        .map(|period| {
            let count = groups.get(&period.index).map_or(0, Vec::len) as u64;
            required.saturating_sub(count.min(required))
        })
        .sum()
}

/// Canonical completion rate: completed over completed plus missed
///
/// Zero when nothing was completed or missed.
pub fn completion_rate(completed: u64, misses: u64) -> f64 {
    let observed = completed + misses;
    if observed == 0 {
        0.0
    } else {
        completed as f64 / observed as f64
    }
}

/// Completions of every habit counted per local calendar day
pub fn completions_by_day<C: Calendar + ?Sized>(
    calendar: &C,
    completions: &[Completion],
) -> BTreeMap<NaiveDate, u32> {
    let mut days = BTreeMap::new();
    for completion in completions {
        *days.entry(calendar.local_date(completion.timestamp)).or_insert(0) += 1;
    }
    days
}

/// Cross-habit daily streaks
///
/// A day is successful when any habit has a completion on it. Days are
/// scanned from the earliest habit start through today; with no habits, or
/// when every habit starts in the future, both streaks are zero.
pub fn overall_daily_streaks<C: Calendar>(
    clock: &PeriodClock<C>,
    habits: &[Habit],
    completions: &[Completion],
) -> OverallStreaks {
    let calendar = clock.calendar();
    let Some(earliest) = habits.iter().map(Habit::anchor_source).min() else {
        return OverallStreaks::default();
    };

    let first_day = calendar.local_date(earliest);
    let today = calendar.local_date(clock.now());
    if first_day > today {
        return OverallStreaks::default();
    }

    // Only days holding completions are visited, in ascending order
    let by_day = completions_by_day(calendar, completions);
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for (day, _) in by_day.range(first_day..=today).filter(|(_, count)| **count > 0) {
        run = match previous {
            Some(p) if add_days(p, 1) == *day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }

    // The last run is the current streak only if it reaches today
    let current = if previous == Some(today) { run } else { 0 };

    OverallStreaks { current, longest }
}

/// Periods of the habit that intersect the window, in index order
fn overlapping_periods<'a, C: Calendar>(
    clock: &'a PeriodClock<C>,
    habit: &'a Habit,
    range: TimeRange,
) -> impl Iterator<Item = Period> + 'a {
    let (first, last) = if range.is_empty() {
        (1, 0)
    } else {
        (
            clock.period_index(habit, range.start),
            clock.period_index(habit, range.end_exclusive - 1),
        )
    };

    (first..=last)
        .map(move |index| clock.period_bounds_for_index(habit, index))
        .filter(move |period| period.overlaps(&range))
}
