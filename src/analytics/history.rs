//! Completion history of one habit, grouped by local day
//!
//! Feeds the history list of the habit detail view: newest day first, each
//! completion tagged with the index of the period it counted towards.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::PeriodClock;
use crate::calendar::{add_days, Calendar};
use crate::domain::{Completion, CompletionId, EpochMillis, Habit, PeriodType};

const DAY_MILLIS: i64 = 86_400_000;

/// Where a history day sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDay {
    Today,
    Yesterday,
    Earlier,
}

/// One completion in the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub completion_id: CompletionId,
    pub timestamp: EpochMillis,
    pub period_index: i64,
}

impl HistoryEntry {
    /// "Day N", "Week N" or "Month N"
    pub fn period_label(&self, period_type: PeriodType) -> String {
        period_type.period_label(self.period_index)
    }
}

/// Completions logged on one local day, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub relative: RelativeDay,
    pub entries: Vec<HistoryEntry>,
}

impl DayGroup {
    /// "Today", "Yesterday" or a date like "Jan 5, 2024"
    pub fn heading(&self) -> String {
        match self.relative {
            RelativeDay::Today => "Today".to_string(),
            RelativeDay::Yesterday => "Yesterday".to_string(),
            RelativeDay::Earlier => self.date.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Group the habit's completions by local day, newest day first
///
/// With `cutoff_days`, only completions logged within that many 24-hour
/// spans before now are listed; `None` lists the whole history.
pub fn completion_history<C: Calendar>(
    clock: &PeriodClock<C>,
    habit: &Habit,
    completions: &[Completion],
    cutoff_days: Option<u32>,
) -> Vec<DayGroup> {
    let calendar = clock.calendar();
    let cutoff = cutoff_days
        .map(|days| clock.now().saturating_sub(i64::from(days).saturating_mul(DAY_MILLIS)))
        .unwrap_or(EpochMillis::MIN);

    let mut listed: Vec<&Completion> = completions
        .iter()
        .filter(|c| c.belongs_to(habit) && c.timestamp >= cutoff)
        .collect();
    listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let today = calendar.local_date(clock.now());
    let yesterday = add_days(today, -1);

    let mut groups: Vec<DayGroup> = Vec::new();
    for completion in listed {
        let date = calendar.local_date(completion.timestamp);
        let entry = HistoryEntry {
            completion_id: completion.id.clone(),
            timestamp: completion.timestamp,
            period_index: clock.period_index(habit, completion.timestamp),
        };

        match groups.last_mut() {
            Some(group) if group.date == date => group.entries.push(entry),
            _ => groups.push(DayGroup {
                date,
                relative: if date == today {
                    RelativeDay::Today
                } else if date == yesterday {
                    RelativeDay::Yesterday
                } else {
                    RelativeDay::Earlier
                },
                entries: vec![entry],
            }),
        }
    }
    groups
}
