//! Derived time intervals: periods and reporting ranges
//!
//! Periods are never stored. They are recomputed on demand from a habit and
//! a pinned "now", so the same inputs always produce the same intervals.

use serde::Serialize;

use crate::calendar::{add_days, Calendar};
use crate::domain::EpochMillis;

/// One period of a habit: the half-open interval `[start, end)`
///
/// `index` counts periods from the habit's anchor day; index 0 contains the
/// anchor and negative indices lie before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub index: i64,
    pub start: EpochMillis,
    pub end: EpochMillis,
}

impl Period {
    /// Check if an instant falls inside this period
    pub fn contains(&self, at: EpochMillis) -> bool {
        at >= self.start && at < self.end
    }

    /// Check if this period shares at least one instant with a range
    pub fn overlaps(&self, range: &TimeRange) -> bool {
        self.end > range.start && self.start < range.end_exclusive
    }
}

/// Arbitrary reporting window `[start, end_exclusive)`
///
/// The window does not have to line up with any habit's periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: EpochMillis,
    pub end_exclusive: EpochMillis,
}

impl TimeRange {
    pub fn new(start: EpochMillis, end_exclusive: EpochMillis) -> Self {
        Self {
            start,
            end_exclusive,
        }
    }

    /// The last `days` calendar days, today included
    ///
    /// A request for zero days is treated as one day.
    pub fn trailing_days<C: Calendar + ?Sized>(calendar: &C, now: EpochMillis, days: u32) -> Self {
        let today = calendar.local_date(now);
        let first = add_days(today, 1 - i64::from(days.max(1)));
        Self {
            start: calendar.day_start(first),
            end_exclusive: calendar.day_start(add_days(today, 1)),
        }
    }

    /// A range with no instants in it
    pub fn is_empty(&self) -> bool {
        self.end_exclusive <= self.start
    }

    pub fn contains(&self, at: EpochMillis) -> bool {
        at >= self.start && at < self.end_exclusive
    }
}
