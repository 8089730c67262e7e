use chrono::NaiveDate;
use dayplan::error::Error;
use dayplan::habits::toggle_completion;
use dayplan::models::{Habit, HabitFrequency, TimeOfDay};
use dayplan::storage::{HabitStore, JsonStore};
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn habit(owner: &str, name: &str) -> Habit {
    Habit {
        id: 0,
        owner: owner.into(),
        name: name.into(),
        description: String::new(),
        frequency: HabitFrequency::default(),
        time_of_day: TimeOfDay::default(),
        goal: None,
        current_streak: 0,
        longest_streak: 0,
        completions: 0,
        completion_history: Vec::new(),
        created_at: "2024-01-01T00:00:00+00:00".into(),
        version: 0,
    }
}

#[test]
fn test_toggle_streak_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let stored = store.create_habit(&habit("default", "Meditate")).unwrap();

    let after_first = toggle_completion(&store, "default", stored.id, d(2024, 3, 10)).unwrap();
    assert_eq!(after_first.current_streak, 1);
    assert_eq!(after_first.completions, 1);
    assert_eq!(after_first.longest_streak, 1);

    let after_second = toggle_completion(&store, "default", stored.id, d(2024, 3, 11)).unwrap();
    assert_eq!(after_second.current_streak, 2);
    assert_eq!(after_second.longest_streak, 2);

    // Toggling today back off collapses the current streak but keeps
    // the high-water mark and yesterday's entry.
    let after_undo = toggle_completion(&store, "default", stored.id, d(2024, 3, 11)).unwrap();
    assert_eq!(after_undo.current_streak, 0);
    assert_eq!(after_undo.completions, 1);
    assert_eq!(after_undo.longest_streak, 2);
    assert_eq!(after_undo.completion_history.len(), 1);

    // The persisted record agrees with the returned one.
    let reloaded = store.find_habit("default", stored.id).unwrap().unwrap();
    assert_eq!(reloaded.current_streak, 0);
    assert_eq!(reloaded.longest_streak, 2);
    assert_eq!(reloaded.completions, 1);
}

#[test]
fn test_longest_streak_never_decreases() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let stored = store.create_habit(&habit("default", "Read")).unwrap();

    let days = [
        d(2024, 3, 10),
        d(2024, 3, 11),
        d(2024, 3, 12),
        d(2024, 3, 12), // off
        d(2024, 3, 20),
        d(2024, 3, 20), // off
        d(2024, 3, 21),
    ];
    let mut longest_seen = 0;
    for day in days {
        let updated = toggle_completion(&store, "default", stored.id, day).unwrap();
        assert!(updated.longest_streak >= longest_seen);
        assert!(updated.longest_streak >= updated.current_streak);
        longest_seen = updated.longest_streak;
    }
    assert_eq!(longest_seen, 3);
}

#[test]
fn test_completions_match_history_after_every_toggle() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let stored = store.create_habit(&habit("default", "Stretch")).unwrap();

    let days = [
        d(2024, 3, 10),
        d(2024, 3, 11),
        d(2024, 3, 11),
        d(2024, 3, 12),
    ];
    for day in days {
        let updated = toggle_completion(&store, "default", stored.id, day).unwrap();
        assert_eq!(updated.completions as usize, updated.completion_history.len());
    }
}

#[test]
fn test_toggle_missing_habit() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let err = toggle_completion(&store, "default", 42, d(2024, 3, 10)).unwrap_err();
    assert!(matches!(err, Error::HabitNotFound { id: 42 }));
}

#[test]
fn test_habits_are_scoped_to_owner() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let stored = store.create_habit(&habit("alice", "Run")).unwrap();

    // Another owner sees plain absence, not someone else's habit.
    let err = toggle_completion(&store, "bob", stored.id, d(2024, 3, 10)).unwrap_err();
    assert!(matches!(err, Error::HabitNotFound { .. }));
    assert!(store.find_habit("bob", stored.id).unwrap().is_none());
}

#[test]
fn test_stale_save_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let stored = store.create_habit(&habit("default", "Write")).unwrap();

    // A toggle bumps the stored version...
    toggle_completion(&store, "default", stored.id, d(2024, 3, 10)).unwrap();

    // ...so saving the copy loaded before the toggle must fail.
    let err = store.save_habit(&stored).unwrap_err();
    assert!(matches!(err, Error::ConcurrentModification { .. }));
}
