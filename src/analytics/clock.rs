//! Period boundaries and indices for a habit at a pinned instant
//!
//! `PeriodClock` captures "now" once, so every index and bound computed during
//! one evaluation agrees with the others.

use chrono::NaiveDate;

use crate::calendar::{add_days, add_months, days_between, first_of_month, months_between, Calendar};
use crate::domain::{EpochMillis, Habit, Period, PeriodType};

/// Calendar plus the instant an evaluation is performed at
#[derive(Debug, Clone)]
pub struct PeriodClock<C: Calendar> {
    calendar: C,
    now: EpochMillis,
}

impl<C: Calendar> PeriodClock<C> {
    pub fn new(calendar: C, now: EpochMillis) -> Self {
        Self { calendar, now }
    }

    pub fn now(&self) -> EpochMillis {
        self.now
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Local date the habit's period sequence starts on
    ///
    /// This is the habit's own start day, except for a habit whose start lies
    /// in the future: its anchor resolves to today until the start day comes.
    pub fn anchor_date(&self, habit: &Habit) -> NaiveDate {
        let today = self.calendar.local_date(self.now);
        let start = self.calendar.local_date(habit.anchor_source());
        today.min(start)
    }

    /// Start of the anchor day as an instant
    pub fn anchor_timestamp(&self, habit: &Habit) -> EpochMillis {
        self.calendar.day_start(self.anchor_date(habit))
    }

    /// Bounds of the period that contains "now"
    pub fn period_bounds(&self, habit: &Habit) -> Period {
        let today = self.calendar.local_date(self.now);
        let anchor = self.anchor_date(habit);

        match habit.period_type {
            PeriodType::Daily => Period {
                index: days_between(today, anchor),
                start: self.calendar.day_start(today),
                end: self.calendar.day_start(add_days(today, 1)),
            },
            PeriodType::Monthly => {
                let month = first_of_month(today);
                Period {
                    index: months_between(month, first_of_month(anchor)),
                    start: self.calendar.day_start(month),
                    end: self.calendar.day_start(add_months(month, 1)),
                }
            }
            PeriodType::Weekly => {
                let days_since = days_between(today, anchor).max(0);
                let week = days_since / 7;
                Period {
                    index: week,
                    start: self.calendar.day_start(add_days(anchor, week * 7)),
                    end: self.calendar.day_start(add_days(anchor, (week + 1) * 7)),
                }
            }
        }
    }

    /// Index of the period containing `at`, relative to the anchor
    ///
    /// Negative for instants before the anchor day.
    pub fn period_index(&self, habit: &Habit, at: EpochMillis) -> i64 {
        let anchor = self.anchor_date(habit);
        let date = self.calendar.local_date(at);

        match habit.period_type {
            PeriodType::Daily => days_between(date, anchor),
            PeriodType::Monthly => months_between(first_of_month(date), first_of_month(anchor)),
            PeriodType::Weekly => days_between(date, anchor).div_euclid(7),
        }
    }

    /// Index of the period containing "now"
    pub fn current_period_index(&self, habit: &Habit) -> i64 {
        self.period_index(habit, self.now)
    }

    /// Bounds of the period with the given index
    ///
    /// Inverse of `period_index`: every instant inside the returned bounds maps
    /// back to `index`.
    pub fn period_bounds_for_index(&self, habit: &Habit, index: i64) -> Period {
        let anchor = self.anchor_date(habit);

        let (start, end) = match habit.period_type {
            PeriodType::Daily => (add_days(anchor, index), add_days(anchor, index.saturating_add(1))),
            PeriodType::Monthly => {
                let month = first_of_month(anchor);
                (add_months(month, index), add_months(month, index.saturating_add(1)))
            }
            PeriodType::Weekly => (
                add_days(anchor, index.saturating_mul(7)),
                add_days(anchor, index.saturating_add(1).saturating_mul(7)),
            ),
        };

        Period {
            index,
            start: self.calendar.day_start(start),
            end: self.calendar.day_start(end),
        }
    }

    /// Check if an instant falls inside the current period
    pub fn is_in_current_period(&self, habit: &Habit, at: EpochMillis) -> bool {
        self.period_bounds(habit).contains(at)
    }

    /// Milliseconds left until the current period ends (never negative)
    pub fn ms_until_period_end(&self, habit: &Habit) -> i64 {
        (self.period_bounds(habit).end - self.now).max(0)
    }
}
