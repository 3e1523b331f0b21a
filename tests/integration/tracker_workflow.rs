//! End-to-end workflow through `HabitTracker`

use habit_period_engine::*;

const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;
/// 2024-01-01T00:00:00Z, a Monday
const JAN_1: i64 = 1_704_067_200_000;

fn tracker() -> HabitTracker<MemoryStore, ZonedCalendar<chrono::Utc>> {
    HabitTracker::new(MemoryStore::new(UserId::from("tester")), ZonedCalendar::utc())
}

fn new_habit(name: &str, period_type: &str, frequency: u32) -> NewHabit {
    NewHabit {
        name: name.to_string(),
        period_type: period_type.to_string(),
        frequency,
        ..NewHabit::default()
    }
}

#[test]
fn test_create_habit_validates_input() {
    let mut tracker = tracker();

    let habit = tracker
        .create_habit(new_habit("  Morning Run ", "daily", 2), JAN_1)
        .expect("Failed to create habit");
    assert_eq!(habit.name, "Morning Run");
    assert_eq!(habit.created_at, JAN_1);

    assert!(matches!(
        tracker.create_habit(new_habit("Run", "yearly", 1), JAN_1),
        Err(TrackerError::Domain(DomainError::InvalidPeriodType(_)))
    ));
    assert!(matches!(
        tracker.create_habit(new_habit("Run", "daily", 0), JAN_1),
        Err(TrackerError::Domain(DomainError::InvalidFrequency(_)))
    ));
    assert!(matches!(
        tracker.create_habit(new_habit("   ", "daily", 1), JAN_1),
        Err(TrackerError::Domain(DomainError::InvalidHabitName(_)))
    ));
    assert_eq!(tracker.store().list_habits().unwrap().len(), 1);
}

#[test]
fn test_mark_done_respects_current_period() {
    let mut tracker = tracker();
    let habit = tracker.create_habit(new_habit("Water", "daily", 2), JAN_1).unwrap();
    let now = JAN_1 + 10 * HOUR;

    tracker.mark_done(&habit.id, now - HOUR, now).unwrap();
    tracker.mark_done(&habit.id, now, now).unwrap();
    assert!(matches!(
        tracker.mark_done(&habit.id, now, now),
        Err(TrackerError::PeriodComplete { required: 2, .. })
    ));

    // In the future
    assert!(matches!(
        tracker.mark_done(&habit.id, now + HOUR, now),
        Err(TrackerError::Domain(DomainError::InvalidTimestamp(_)))
    ));

    // Yesterday's slot is closed once the day has passed
    let tomorrow = now + DAY;
    assert!(matches!(
        tracker.mark_done(&habit.id, now, tomorrow),
        Err(TrackerError::OutsideCurrentPeriod { .. })
    ));

    assert!(matches!(
        tracker.mark_done(&HabitId::from("missing"), now, now),
        Err(TrackerError::Storage(StorageError::HabitNotFound { .. }))
    ));
}

#[test]
fn test_undo_removes_latest_in_current_period() {
    let mut tracker = tracker();
    let habit = tracker.create_habit(new_habit("Stretch", "weekly", 3), JAN_1).unwrap();

    let first = tracker.mark_done(&habit.id, JAN_1 + HOUR, JAN_1 + HOUR).unwrap();
    let second = tracker.mark_done(&habit.id, JAN_1 + DAY, JAN_1 + DAY).unwrap();

    let undone = tracker.undo_last_completion(&habit.id, JAN_1 + 2 * DAY).unwrap();
    assert_eq!(undone.map(|c| c.id), Some(second.id));

    let remaining = tracker.store().list_completions(Some(&habit.id)).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first.id);

    // Next week has nothing to undo
    assert!(tracker.undo_last_completion(&habit.id, JAN_1 + 8 * DAY).unwrap().is_none());
}

#[test]
fn test_edit_completion_checks_timestamp() {
    let mut tracker = tracker();
    let habit = tracker.create_habit(new_habit("Read", "daily", 1), JAN_1 + DAY).unwrap();
    let now = JAN_1 + 3 * DAY + 5 * HOUR;
    let completion = tracker.mark_done(&habit.id, now - HOUR, now).unwrap();

    let moved = tracker.edit_completion(&completion.id, JAN_1 + 2 * DAY, now).unwrap();
    assert_eq!(moved.timestamp, JAN_1 + 2 * DAY);

    assert!(tracker.edit_completion(&completion.id, now + 1, now).is_err());
    assert!(tracker.edit_completion(&completion.id, JAN_1, now).is_err());
    assert!(matches!(
        tracker.edit_completion(&CompletionId::from("missing"), now, now),
        Err(TrackerError::Storage(StorageError::CompletionNotFound { .. }))
    ));
}

#[test]
fn test_stats_and_dashboard_follow_the_history() {
    let mut tracker = tracker();
    let run = tracker.create_habit(new_habit("Run", "daily", 1), JAN_1).unwrap();
    let gym = tracker.create_habit(new_habit("Gym", "weekly", 2), JAN_1).unwrap();

    for day in [0, 1, 2, 4] {
        let at = JAN_1 + day * DAY + 7 * HOUR;
        tracker.mark_done(&run.id, at, at).unwrap();
    }
    for day in [1, 3] {
        let at = JAN_1 + day * DAY + 18 * HOUR;
        tracker.mark_done(&gym.id, at, at).unwrap();
    }

    let now = JAN_1 + 4 * DAY + 20 * HOUR;
    let stats = tracker.habit_stats(&run.id, now).unwrap();
    assert_eq!(stats.streaks.current_streak, 1);
    assert_eq!(stats.streaks.best_streak, 3);
    assert_eq!(stats.fail_count, 1);
    assert_eq!(stats.total_completions, 4);
    assert!(stats.progress.is_done());

    let report = tracker.dashboard(now, &DashboardQuery::default()).unwrap();
    assert_eq!(report.totals.total_completions, 6);
    assert_eq!(report.overall.current, 5);
    assert_eq!(report.rows.len(), 2);

    let gym_row = report.rows.iter().find(|r| r.habit_id == gym.id).unwrap();
    assert_eq!(gym_row.completed, 2);
    assert_eq!(gym_row.current_streak, 1);
}

#[test]
fn test_update_and_delete_habit() {
    let mut tracker = tracker();
    let habit = tracker.create_habit(new_habit("Walk", "daily", 1), JAN_1).unwrap();
    tracker.mark_done(&habit.id, JAN_1 + HOUR, JAN_1 + HOUR).unwrap();

    let update = HabitUpdate {
        period_type: Some(PeriodType::Weekly),
        frequency: Some(3),
        ..HabitUpdate::default()
    };
    let updated = tracker.update_habit(&habit.id, update, JAN_1 + 2 * HOUR).unwrap();
    assert_eq!(updated.period_type, PeriodType::Weekly);
    assert_eq!(updated.required(), 3);
    assert_eq!(updated.updated_at, Some(JAN_1 + 2 * HOUR));

    let bad = HabitUpdate {
        frequency: Some(0),
        ..HabitUpdate::default()
    };
    assert!(tracker.update_habit(&habit.id, bad, JAN_1 + 3 * HOUR).is_err());
    assert_eq!(tracker.store().get_habit(&habit.id).unwrap().required(), 3);

    tracker.delete_habit(&habit.id).unwrap();
    assert!(tracker.store().list_habits().unwrap().is_empty());
    assert!(tracker.store().list_completions(None).unwrap().is_empty());
}

#[test]
fn test_completion_history_lists_recent_days() {
    let mut tracker = tracker();
    // Starts on a Wednesday, so weeks run Wednesday to Tuesday
    let habit = tracker.create_habit(new_habit("Swim", "weekly", 2), JAN_1 + 2 * DAY).unwrap();

    for day in [2, 8, 9, 15] {
        let at = JAN_1 + day * DAY + 6 * HOUR;
        tracker.mark_done(&habit.id, at, at).unwrap();
    }

    let now = JAN_1 + 16 * DAY + 6 * HOUR;
    let all = tracker.completion_history(&habit.id, now, None).unwrap();
    let headings: Vec<_> = all.iter().map(|g| g.heading()).collect();
    assert_eq!(headings, vec!["Yesterday", "Jan 10, 2024", "Jan 9, 2024", "Jan 3, 2024"]);

    let labels: Vec<_> = all
        .iter()
        .flat_map(|g| &g.entries)
        .map(|e| e.period_label(habit.period_type))
        .collect();
    assert_eq!(labels, vec!["Week 2", "Week 2", "Week 1", "Week 1"]);

    let week = tracker.completion_history(&habit.id, now, Some(7)).unwrap();
    assert_eq!(week.len(), 2);
}
