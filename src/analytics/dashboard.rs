//! Dashboard report for a trailing window of days
//!
//! Totals and the overall streak cover every habit; the per-habit rows can be
//! narrowed by period type and by a name search.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::analytics::range::{
    completion_rate, completions_by_day, misses_in_range, overall_daily_streaks,
    scheduled_and_completed_in_range, OverallStreaks, RangeTally,
};
use crate::analytics::streak::streaks;
use crate::analytics::PeriodClock;
use crate::calendar::Calendar;
use crate::domain::{Completion, Habit, HabitId, PeriodType, TimeRange};

/// Window length shown by default
pub const DEFAULT_RANGE_DAYS: u32 = 7;

/// Longest window accepted for a report
pub const MAX_RANGE_DAYS: u32 = 366;

/// What the caller wants to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Number of calendar days ending today
    pub range_days: u32,
    /// Only list habits of this period type
    pub period_type: Option<PeriodType>,
    /// Case-insensitive substring of the habit name
    pub search: Option<String>,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            range_days: DEFAULT_RANGE_DAYS,
            period_type: None,
            search: None,
        }
    }
}

impl DashboardQuery {
    /// Check if a habit passes the row filters
    pub fn matches(&self, habit: &Habit) -> bool {
        let type_ok = self.period_type.map_or(true, |t| t == habit.period_type);
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                habit.name.to_lowercase().contains(&query.to_lowercase())
            }
            _ => true,
        };
        type_ok && search_ok
    }
}

/// Aggregate numbers over every habit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    /// Raw completions inside the window, not capped
    pub total_completions: u64,
    pub scheduled: u64,
    pub completed: u64,
    pub misses: u64,
    pub completion_rate: f64,
}

/// One line of the habit table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRow {
    pub habit_id: HabitId,
    pub name: String,
    pub period_type: PeriodType,
    pub frequency: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub scheduled: u64,
    pub completed: u64,
    pub misses: u64,
    pub rate: f64,
}

/// Completions logged on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Everything the dashboard shows for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub range: TimeRange,
    pub range_days: u32,
    pub totals: DashboardTotals,
    pub overall: OverallStreaks,
    /// One entry per day of the window, oldest first
    pub trend: Vec<DayCount>,
    /// Completions per weekday over the window, Sunday first
    pub weekdays: [u32; 7],
    pub rows: Vec<HabitRow>,
}

/// Build the dashboard for the window ending today
pub fn build_dashboard<C: Calendar>(
    clock: &PeriodClock<C>,
    habits: &[Habit],
    completions: &[Completion],
    query: &DashboardQuery,
) -> DashboardReport {
    let calendar = clock.calendar();
    let range_days = query.range_days.clamp(1, MAX_RANGE_DAYS);
    let range = TimeRange::trailing_days(calendar, clock.now(), range_days);

    let mut tally = RangeTally::default();
    let mut misses = 0u64;
    let mut rows = Vec::new();
    for habit in habits {
        let habit_tally = scheduled_and_completed_in_range(clock, habit, completions, range);
        let habit_misses = misses_in_range(clock, habit, completions, range);
        tally.add(habit_tally);
        misses += habit_misses;

        if query.matches(habit) {
            let summary = streaks(clock, habit, completions);
            rows.push(HabitRow {
                habit_id: habit.id.clone(),
                name: habit.name.clone(),
                period_type: habit.period_type,
                frequency: habit.required(),
                current_streak: summary.current_streak,
                best_streak: summary.best_streak,
                scheduled: habit_tally.scheduled,
                completed: habit_tally.completed,
                misses: habit_misses,
                rate: completion_rate(habit_tally.completed, habit_misses),
            });
        }
    }

    let total_completions = completions
        .iter()
        .filter(|c| range.contains(c.timestamp))
        .count() as u64;

    let by_day = completions_by_day(calendar, completions);
    let first_day = calendar.local_date(range.start);
    let today = calendar.local_date(clock.now());
    let trend: Vec<DayCount> = first_day
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| DayCount {
            date,
            count: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    let mut weekdays = [0u32; 7];
    for day in &trend {
        weekdays[day.date.weekday().num_days_from_sunday() as usize] += day.count;
    }

    tracing::debug!(
        habits = habits.len(),
        rows = rows.len(),
        range_days,
        "assembled dashboard report"
    );

    DashboardReport {
        range,
        range_days,
        totals: DashboardTotals {
            total_completions,
            scheduled: tally.scheduled,
            completed: tally.completed,
            misses,
            completion_rate: completion_rate(tally.completed, misses),
        },
        overall: overall_daily_streaks(clock, habits, completions),
        trend,
        weekdays,
        rows,
    }
}
