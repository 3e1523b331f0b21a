//! Plain-text rendering of engine results
//!
//! Used by the `habit-report` binary. The layout mirrors the dashboard and
//! habit detail views: a summary line followed by one block per habit.

use chrono::{DateTime, Utc};

use crate::analytics::{DashboardReport, DayGroup, HabitStats, PeriodClock};
use crate::calendar::Calendar;
use crate::domain::{EpochMillis, Habit, PeriodType};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Format a duration as its largest whole unit: "3d", "9h", "12m" or "40s"
///
/// Negative durations are shown as "0s".
pub fn format_short_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let minutes = total_seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else if minutes >= 1 {
        format!("{}m", minutes)
    } else {
        format!("{}s", total_seconds)
    }
}

fn format_percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

/// Render the dashboard as text
pub fn render_dashboard(report: &DashboardReport) -> String {
    let totals = &report.totals;
    let mut lines = vec![
        format!(
            "📊 Last {} days: {} completions | {}/{} scheduled | {} missed | Rate: {}",
            report.range_days,
            totals.total_completions,
            totals.completed,
            totals.scheduled,
            totals.misses,
            format_percent(totals.completion_rate)
        ),
        format!(
            "🔥 Overall streak: {} days | Longest: {} days",
            report.overall.current, report.overall.longest
        ),
        String::new(),
        "Trend:".to_string(),
    ];

    lines.extend(report.trend.iter().map(|day| {
        format!(
            "   {}  {:>3} {}",
            day.date.format("%a %b %-d"),
            day.count,
            "▇".repeat(day.count as usize)
        )
    }));

    let weekdays = WEEKDAY_NAMES
        .iter()
        .zip(report.weekdays.iter())
        .map(|(name, count)| format!("{} {}", name, count))
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(String::new());
    lines.push(format!("By weekday: {}", weekdays));

    if report.rows.is_empty() {
        lines.push(String::new());
        lines.push("No habits found. Create your first habit to get started!".to_string());
    }

    for row in &report.rows {
        lines.push(String::new());
        lines.push(format!(
            "🎯 {} ({}, {}x per {})",
            row.name,
            row.period_type.title(),
            row.frequency,
            row.period_type.unit()
        ));
        lines.push(format!(
            "   Streak: {} | Best: {} | {}/{} scheduled | {} missed | Rate: {}",
            row.current_streak,
            row.best_streak,
            row.completed,
            row.scheduled,
            row.misses,
            format_percent(row.rate)
        ));
    }

    lines.join("\n") + "\n"
}

/// Render the detail view of one habit
pub fn render_habit_detail<C: Calendar>(clock: &PeriodClock<C>, habit: &Habit, stats: &HabitStats) -> String {
    let period_type = habit.period_type;

    let status = if stats.progress.is_done() {
        format!("✅ Done {}", period_type.current_label().to_lowercase())
    } else {
        format!("{}: {}/{}", period_type.current_label(), stats.progress.value, stats.progress.required)
    };

    let mut lines = vec![
        format!(
            "🎯 {} ({}, target {}/{})",
            habit.name,
            period_type.title(),
            habit.required(),
            period_type.unit()
        ),
        format!(
            "   {} | {} | Resets in {}",
            status,
            period_type.period_label(clock.current_period_index(habit)),
            format_short_duration(clock.ms_until_period_end(habit))
        ),
        format!(
            "   Streak: {} | Best: {} | Fails: {} | Record: {} | Total: {}",
            stats.streaks.current_streak,
            stats.streaks.best_streak,
            stats.fail_count,
            stats.record,
            stats.total_completions
        ),
    ];
    if let Some(last) = stats.last_completed {
        lines.push(format!("   Last completed: {}", format_instant(clock.calendar(), last)));
    }

    lines.join("\n") + "\n"
}

/// Render the completion history list of one habit
pub fn render_completion_history(groups: &[DayGroup], period_type: PeriodType) -> String {
    if groups.is_empty() {
        return "No completions in this range.\n".to_string();
    }

    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("📅 {}", group.heading()));
        lines.extend(group.entries.iter().map(|entry| {
            format!(
                "   • {} at {}",
                entry.period_label(period_type),
                format_time(entry.timestamp)
            )
        }));
    }

    lines.join("\n") + "\n"
}

fn format_time(at: EpochMillis) -> String {
    match DateTime::<Utc>::from_timestamp_millis(at) {
        Some(instant) => instant.to_rfc3339(),
        None => at.to_string(),
    }
}

fn format_instant<C: Calendar>(calendar: &C, at: EpochMillis) -> String {
    format!("{} ({})", calendar.local_date(at).format("%b %-d, %Y"), format_time(at))
}
