//! Progress, streak and range metrics on hand-built histories

use habit_period_engine::analytics::{
    completion_rate, current_period_progress, fail_count, misses_in_range, overall_daily_streaks,
    scheduled_and_completed_in_range, streaks, OverallStreaks, RangeTally, StreakSummary,
};
use habit_period_engine::{AnalyticsEngine, PeriodClock, PeriodType, TimeRange, ZonedCalendar};

use crate::common::*;

fn clock_at(now: i64) -> PeriodClock<ZonedCalendar<chrono::Utc>> {
    PeriodClock::new(ZonedCalendar::utc(), now)
}

#[test]
fn test_daily_streak_with_skipped_day() {
    let habit = habit("run", PeriodType::Daily, 1, JAN_1);
    let clock = clock_at(noon(3));

    let with_today = streaks(&clock, &habit, &done_on_days("run", &[0, 1, 3]));
    assert_eq!(with_today, StreakSummary { current_streak: 1, best_streak: 2 });

    let without_today = streaks(&clock, &habit, &done_on_days("run", &[0, 1]));
    assert_eq!(without_today, StreakSummary { current_streak: 0, best_streak: 2 });
}

#[test]
fn test_weekly_in_progress_period_is_not_a_fail() {
    let habit = habit("gym", PeriodType::Weekly, 3, JAN_1);
    let clock = clock_at(noon(9));
    let completions = done_on_days("gym", &[0, 2, 4, 8]);

    assert_eq!(fail_count(&clock, &habit, &completions), 0);
    let summary = streaks(&clock, &habit, &completions);
    assert_eq!(summary.best_streak, 1);
    assert_eq!(summary.current_streak, 0);
}

#[test]
fn test_streaks_are_zero_without_completions() {
    let clock = clock_at(noon(30));
    for period_type in [PeriodType::Daily, PeriodType::Weekly, PeriodType::Monthly] {
        let habit = habit("h", period_type, 2, JAN_1);
        assert_eq!(streaks(&clock, &habit, &[]), StreakSummary::default());
    }
}

#[test]
fn test_progress_never_exceeds_frequency() {
    let clock = clock_at(noon(5));
    for frequency in 1..=4 {
        let habit = habit("h", PeriodType::Daily, frequency, JAN_1);
        let completions = done_on_days("h", &[5, 5, 5, 5, 5, 5]);

        let progress = current_period_progress(&clock, &habit, &completions);
        assert_eq!(progress.value, frequency);
        assert!(progress.ratio <= 1.0);
    }
}

#[test]
fn test_other_habits_completions_are_ignored() {
    let habit = habit("read", PeriodType::Daily, 1, JAN_1);
    let clock = clock_at(noon(2));
    let mut completions = done_on_days("write", &[0, 1, 2]);
    completions.extend(done_on_days("read", &[2]));

    assert_eq!(streaks(&clock, &habit, &completions).best_streak, 1);
    assert_eq!(fail_count(&clock, &habit, &completions), 2);
}

#[test]
fn test_partially_overlapping_weeks_count_in_full() {
    // Weeks run Monday to Monday; Thursday..Wednesday touches two of them
    let habit = habit("gym", PeriodType::Weekly, 3, JAN_1);
    let clock = clock_at(noon(40));
    let range = TimeRange::new(JAN_1 + 3 * DAY, JAN_1 + 10 * DAY);
    let completions = done_on_days("gym", &[0, 1, 8]);

    let tally = scheduled_and_completed_in_range(&clock, &habit, &completions, range);
    assert_eq!(tally, RangeTally { scheduled: 6, completed: 3 });
    assert_eq!(misses_in_range(&clock, &habit, &completions, range), 3);
}

#[test]
fn test_misses_wait_for_the_period_to_end() {
    let habit = habit("gym", PeriodType::Weekly, 3, JAN_1);
    let clock = clock_at(noon(5));
    let range = TimeRange::new(JAN_1, JAN_1 + 7 * DAY);

    assert_eq!(misses_in_range(&clock, &habit, &[], range), 0);
    let tally = scheduled_and_completed_in_range(&clock, &habit, &[], range);
    assert_eq!(tally.scheduled, 3);
}

#[test]
fn test_overall_streak_counts_any_habit() {
    let habits = vec![
        habit("a", PeriodType::Daily, 1, JAN_1),
        habit("b", PeriodType::Daily, 1, JAN_1),
    ];
    let mut completions = done_on_days("a", &[0, 1]);
    completions.extend(done_on_days("b", &[2, 3]));

    let overall = overall_daily_streaks(&clock_at(noon(3)), &habits, &completions);
    assert_eq!(overall, OverallStreaks { current: 4, longest: 4 });

    let tomorrow = overall_daily_streaks(&clock_at(noon(4)), &habits, &completions);
    assert_eq!(tomorrow, OverallStreaks { current: 0, longest: 4 });
}

#[test]
fn test_overall_streak_for_future_habits_is_empty() {
    let mut future = habit("a", PeriodType::Daily, 1, JAN_1);
    future.start_date = Some(JAN_1 + 20 * DAY);
    future.created_at = JAN_1 + 10 * DAY;

    let overall = overall_daily_streaks(&clock_at(noon(5)), &[future], &done_on_days("a", &[5]));
    assert_eq!(overall, OverallStreaks::default());
}

#[test]
fn test_completion_rate_uses_finished_periods() {
    let habit = habit("run", PeriodType::Daily, 1, JAN_1);
    let engine = AnalyticsEngine::new(ZonedCalendar::utc(), noon(6));
    let range = TimeRange::trailing_days(&ZonedCalendar::utc(), noon(6), 7);
    let completions = done_on_days("run", &[0, 2, 3]);

    let tally = engine.scheduled_and_completed_in_range(&habit, &completions, range);
    let misses = engine.misses_in_range(&habit, &completions, range);
    assert_eq!(tally, RangeTally { scheduled: 7, completed: 3 });
    // Days 1, 4 and 5 missed; day 6 is still open
    assert_eq!(misses, 3);
    assert_eq!(completion_rate(tally.completed, misses), 0.5);
}
