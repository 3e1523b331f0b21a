//! Snapshot import and export through the file system

use habit_period_engine::*;
use tempfile::tempdir;

const JAN_1: i64 = 1_704_067_200_000;

#[test]
fn test_snapshot_round_trip_through_file() {
    let mut tracker = HabitTracker::new(MemoryStore::new(UserId::from("alice")), ZonedCalendar::utc());
    let habit = tracker
        .create_habit(
            NewHabit {
                name: "Journal".to_string(),
                description: Some("Three lines".to_string()),
                period_type: "monthly".to_string(),
                frequency: 4,
                start_date: Some(JAN_1),
                ..NewHabit::default()
            },
            JAN_1 + 1000,
        )
        .unwrap();
    tracker.mark_done(&habit.id, JAN_1 + 5000, JAN_1 + 5000).unwrap();

    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("snapshot.json");

    let exported = Snapshot::from_store(tracker.store()).unwrap();
    exported.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"periodType\": \"monthly\""));
    assert!(raw.contains("\"habitId\""));
    assert!(raw.contains("\"userId\": \"alice\""));

    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded, exported);

    let store = loaded.into_store(UserId::from("fallback"));
    assert_eq!(store.owner(), &UserId::from("alice"));
    let restored = HabitTracker::new(store, ZonedCalendar::utc());
    let stats = restored.habit_stats(&habit.id, JAN_1 + 10_000).unwrap();
    assert_eq!(stats.total_completions, 1);
    assert_eq!(stats.progress.required, 4);
}

#[test]
fn test_loading_missing_or_broken_snapshot_fails() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Snapshot::load(&dir.path().join("absent.json")),
        Err(StorageError::Io(_))
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ \"habits\": [ { \"id\": 1 } ] }").unwrap();
    assert!(matches!(Snapshot::load(&broken), Err(StorageError::Serialization(_))));
}
