//! Period tiling, indexing and boundary behavior

use chrono_tz::Tz;
use habit_period_engine::calendar::Calendar;
use habit_period_engine::{PeriodClock, PeriodType, ZonedCalendar};

use crate::common::*;

const ALL_TYPES: [PeriodType; 3] = [PeriodType::Daily, PeriodType::Weekly, PeriodType::Monthly];

fn check_tiling<C: Calendar>(clock: &PeriodClock<C>) {
    for period_type in ALL_TYPES {
        // Created on a Wednesday, mid-month
        let habit = habit("h", period_type, 1, JAN_1 + 16 * DAY + 7 * HOUR);

        for index in -5..60 {
            let current = clock.period_bounds_for_index(&habit, index);
            let next = clock.period_bounds_for_index(&habit, index + 1);

            assert!(current.start < current.end, "{:?} period {} is empty", period_type, index);
            assert_eq!(current.end, next.start, "{:?} period {} leaves a gap", period_type, index);
            assert_eq!(clock.period_index(&habit, current.start), index);
            assert_eq!(clock.period_index(&habit, current.end - 1), index);
        }
    }
}

#[test]
fn test_periods_tile_in_utc() {
    check_tiling(&PeriodClock::new(ZonedCalendar::utc(), noon(400)));
}

#[test]
fn test_periods_tile_across_dst_changes() {
    // The window covers both 2024 transitions in Berlin and in New York
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    check_tiling(&PeriodClock::new(ZonedCalendar::new(berlin), noon(400)));

    let new_york: Tz = "America/New_York".parse().unwrap();
    check_tiling(&PeriodClock::new(ZonedCalendar::new(new_york), noon(400)));
}

#[test]
fn test_period_index_is_monotonic() {
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let clock = PeriodClock::new(ZonedCalendar::new(berlin), noon(500));

    for period_type in ALL_TYPES {
        let habit = habit("h", period_type, 1, JAN_1 + 3 * DAY);
        let mut previous = i64::MIN;
        let mut at = JAN_1 - 40 * DAY;
        while at < JAN_1 + 450 * DAY {
            let index = clock.period_index(&habit, at);
            assert!(index >= previous, "{:?} index went backwards at {}", period_type, at);
            previous = index;
            at += 7 * HOUR + 13 * 60_000;
        }
    }
}

#[test]
fn test_current_period_contains_now() {
    let now = noon(45) + 5 * HOUR;
    let clock = PeriodClock::new(ZonedCalendar::utc(), now);

    for period_type in ALL_TYPES {
        let habit = habit("h", period_type, 2, JAN_1 + 2 * DAY);
        let bounds = clock.period_bounds(&habit);

        assert!(bounds.start <= now && now < bounds.end);
        assert_eq!(bounds, clock.period_bounds_for_index(&habit, bounds.index));
        assert_eq!(clock.ms_until_period_end(&habit), bounds.end - now);
    }
}

#[test]
fn test_monthly_index_changes_on_the_first() {
    // Created 2024-01-20; Feb 1 is day 31 and Mar 1 is day 60 (leap year)
    let habit = habit("h", PeriodType::Monthly, 1, JAN_1 + 19 * DAY);
    let clock = PeriodClock::new(ZonedCalendar::utc(), noon(90));

    assert_eq!(clock.period_index(&habit, JAN_1 + 19 * DAY), 0);
    assert_eq!(clock.period_index(&habit, JAN_1 + 31 * DAY - 1), 0);
    assert_eq!(clock.period_index(&habit, JAN_1 + 31 * DAY), 1);
    assert_eq!(clock.period_index(&habit, JAN_1 + 60 * DAY - 1), 1);
    assert_eq!(clock.period_index(&habit, JAN_1 + 60 * DAY), 2);

    let february = clock.period_bounds_for_index(&habit, 1);
    assert_eq!(february.start, JAN_1 + 31 * DAY);
    assert_eq!(february.end, JAN_1 + 60 * DAY);
}

#[test]
fn test_weekly_periods_roll_from_the_start_day() {
    // Habit started on a Thursday; weeks run Thursday to Thursday
    let habit = habit("h", PeriodType::Weekly, 1, JAN_1 + 3 * DAY + 18 * HOUR);
    let clock = PeriodClock::new(ZonedCalendar::utc(), noon(12));

    let bounds = clock.period_bounds(&habit);
    assert_eq!(bounds.index, 1);
    assert_eq!(bounds.start, JAN_1 + 10 * DAY);
    assert_eq!(bounds.end, JAN_1 + 17 * DAY);
    assert_eq!(clock.period_index(&habit, JAN_1 + 2 * DAY), -1);
}

#[test]
fn test_future_start_anchors_on_today() {
    let mut habit = habit("h", PeriodType::Daily, 1, JAN_1);
    habit.start_date = Some(JAN_1 + 10 * DAY);
    let clock = PeriodClock::new(ZonedCalendar::utc(), noon(4));

    assert_eq!(clock.anchor_timestamp(&habit), JAN_1 + 4 * DAY);
    assert_eq!(clock.current_period_index(&habit), 0);
}

#[test]
fn test_extreme_timestamps_do_not_panic() {
    let clock = PeriodClock::new(ZonedCalendar::utc(), noon(0));

    for period_type in ALL_TYPES {
        let habit = habit("h", period_type, 1, JAN_1);
        let low = clock.period_index(&habit, i64::MIN);
        let high = clock.period_index(&habit, i64::MAX);
        assert!(low < 0 && high > 0);

        let far = clock.period_bounds_for_index(&habit, i64::MAX);
        assert!(far.start <= far.end);
        let _ = clock.period_bounds_for_index(&habit, i64::MIN);
    }
}
