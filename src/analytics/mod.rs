//! Analytics engine for progress, streaks and range statistics
//!
//! Every function in this module tree is pure: results depend only on the
//! habits and completions passed in, the calendar, and the instant the
//! evaluation is pinned to. Nothing is cached between calls.

pub mod clock;
pub mod dashboard;
pub mod history;
pub mod progress;
pub mod range;
pub mod streak;

pub use clock::PeriodClock;
pub use dashboard::{
    build_dashboard, DashboardQuery, DashboardReport, DashboardTotals, DayCount, HabitRow,
    DEFAULT_RANGE_DAYS, MAX_RANGE_DAYS,
};
pub use history::{completion_history, DayGroup, HistoryEntry, RelativeDay};
pub use progress::{current_period_progress, PeriodProgress};
pub use range::{
    completion_rate, completions_by_day, misses_in_range, overall_daily_streaks,
    scheduled_and_completed_in_range, OverallStreaks, RangeTally,
};
pub use streak::{
    completions_by_period, fail_count, habit_stats, is_period_successful, record, streaks,
    HabitStats, PeriodGroups, StreakSummary,
};

use crate::calendar::Calendar;
use crate::domain::{Completion, EpochMillis, Habit, Period, TimeRange};

/// Analytics engine evaluating habits at one pinned instant
///
/// This bundles a calendar with "now" and exposes every calculation the
/// presentation layer needs. Build a fresh engine per evaluation instead of
/// keeping one around, so "now" is never stale.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<C: Calendar> {
    clock: PeriodClock<C>,
}

impl<C: Calendar> AnalyticsEngine<C> {
    /// Create an engine for the given calendar and instant
    pub fn new(calendar: C, now: EpochMillis) -> Self {
        Self {
            clock: PeriodClock::new(calendar, now),
        }
    }

    pub fn clock(&self) -> &PeriodClock<C> {
        &self.clock
    }

    pub fn now(&self) -> EpochMillis {
        self.clock.now()
    }

    /// Bounds of the habit's current period
    pub fn period_bounds(&self, habit: &Habit) -> Period {
        self.clock.period_bounds(habit)
    }

    /// Index of the period containing `at`
    pub fn period_index(&self, habit: &Habit, at: EpochMillis) -> i64 {
        self.clock.period_index(habit, at)
    }

    /// Bounds of the period with the given index
    pub fn period_bounds_for_index(&self, habit: &Habit, index: i64) -> Period {
        self.clock.period_bounds_for_index(habit, index)
    }

    pub fn current_period_progress(&self, habit: &Habit, completions: &[Completion]) -> PeriodProgress {
        current_period_progress(&self.clock, habit, completions)
    }

    pub fn streaks(&self, habit: &Habit, completions: &[Completion]) -> StreakSummary {
        streaks(&self.clock, habit, completions)
    }

    pub fn fail_count(&self, habit: &Habit, completions: &[Completion]) -> u32 {
        fail_count(&self.clock, habit, completions)
    }

    pub fn record(&self, habit: &Habit, completions: &[Completion]) -> u32 {
        record(&self.clock, habit, completions)
    }

    /// Calculate the habit detail statistics
    pub fn habit_stats(&self, habit: &Habit, completions: &[Completion]) -> HabitStats {
        habit_stats(&self.clock, habit, completions)
    }

    pub fn scheduled_and_completed_in_range(
        &self,
        habit: &Habit,
        completions: &[Completion],
        range: TimeRange,
    ) -> RangeTally {
        scheduled_and_completed_in_range(&self.clock, habit, completions, range)
    }

    pub fn misses_in_range(&self, habit: &Habit, completions: &[Completion], range: TimeRange) -> u64 {
        misses_in_range(&self.clock, habit, completions, range)
    }

    pub fn overall_daily_streaks(&self, habits: &[Habit], completions: &[Completion]) -> OverallStreaks {
        overall_daily_streaks(&self.clock, habits, completions)
    }

    /// Completion history grouped by local day, newest first
    pub fn completion_history(
        &self,
        habit: &Habit,
        completions: &[Completion],
        cutoff_days: Option<u32>,
    ) -> Vec<DayGroup> {
        completion_history(&self.clock, habit, completions, cutoff_days)
    }

    /// Build the dashboard report for a trailing window
    pub fn dashboard(
        &self,
        habits: &[Habit],
        completions: &[Completion],
        query: &DashboardQuery,
    ) -> DashboardReport {
        build_dashboard(&self.clock, habits, completions, query)
    }
}
