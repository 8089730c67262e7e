use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use dayplan::error::Error;
use dayplan::models::{
    DayNote, Frequency, Priority, Reminder, RepeatSpec, Task, TaskKind,
};
use dayplan::planner::{materialize, plan_day};
use dayplan::storage::{JsonStore, NoteStore, TaskStore};
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn daily(interval: u32) -> RepeatSpec {
    RepeatSpec {
        frequency: Frequency::Daily,
        interval,
        end_date: None,
        days_of_week: None,
    }
}

fn template(owner: &str, title: &str, anchor: NaiveDate, spec: RepeatSpec) -> Task {
    Task {
        id: 0,
        owner: owner.into(),
        title: title.into(),
        description: String::new(),
        date: anchor,
        kind: TaskKind::Binary,
        completed: false,
        completed_at: None,
        created_at: "2024-01-01T00:00:00+00:00".into(),
        repeat: Some(spec),
        parent_id: None,
        priority: Priority::default(),
        tags: Vec::new(),
        reminder: Reminder::default(),
        duration: None,
    }
}

#[test]
fn test_materialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let tpl = store
        .create_task(&template("default", "Water plants", d(2024, 3, 1), daily(1)))
        .unwrap();

    let day = d(2024, 3, 10);
    let created = materialize(&store, "default", day).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].parent_id, Some(tpl.id));
    assert_eq!(created[0].date, day);
    assert!(!created[0].completed);
    assert!(created[0].repeat.is_none());

    let again = materialize(&store, "default", day).unwrap();
    assert!(again.is_empty());

    let instances = store.find_in_range("default", day, day).unwrap();
    assert_eq!(instances.len(), 1);
}

#[test]
fn test_materialize_skips_expired_templates() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let mut spec = daily(1);
    spec.end_date = Some(d(2024, 3, 5));
    store
        .create_task(&template("default", "Old habit", d(2024, 3, 1), spec))
        .unwrap();

    assert!(materialize(&store, "default", d(2024, 3, 10))
        .unwrap()
        .is_empty());
    // The end date itself is still in range.
    assert_eq!(materialize(&store, "default", d(2024, 3, 5)).unwrap().len(), 1);
}

#[test]
fn test_materialize_skips_non_matching_days() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let spec = RepeatSpec {
        frequency: Frequency::Weekly,
        interval: 1,
        end_date: None,
        days_of_week: Some(vec![1]), // Mondays
    };
    store
        .create_task(&template("default", "Weekly review", d(2024, 1, 1), spec))
        .unwrap();

    // 2024-01-09 is a Tuesday.
    assert!(materialize(&store, "default", d(2024, 1, 9))
        .unwrap()
        .is_empty());
    // 2024-01-08 is the Monday one week out.
    assert_eq!(materialize(&store, "default", d(2024, 1, 8)).unwrap().len(), 1);
}

#[test]
fn test_materialize_copies_descriptive_fields() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let mut tpl = template("default", "Pushups", d(2024, 3, 1), daily(1));
    tpl.description = "Morning set".into();
    tpl.kind = TaskKind::Count { quantity: 20 };
    tpl.priority = Priority::High;
    tpl.tags = vec!["fitness".into()];
    tpl.reminder = Reminder {
        enabled: true,
        time: Some("07:30".into()),
    };
    tpl.duration = Some(10);
    let tpl = store.create_task(&tpl).unwrap();

    let created = materialize(&store, "default", d(2024, 3, 2)).unwrap();
    assert_eq!(created.len(), 1);
    let instance = &created[0];
    assert_eq!(instance.title, "Pushups");
    assert_eq!(instance.description, "Morning set");
    assert_eq!(instance.kind, TaskKind::Count { quantity: 20 });
    assert_eq!(instance.priority, Priority::High);
    assert_eq!(instance.tags, vec!["fitness".to_string()]);
    assert_eq!(instance.reminder.time.as_deref(), Some("07:30"));
    assert_eq!(instance.duration, Some(10));
    assert_eq!(instance.parent_id, Some(tpl.id));
    assert!(!instance.completed);
}

#[test]
fn test_duplicate_instance_is_suppressed() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    let tpl = store
        .create_task(&template("default", "Journal", d(2024, 3, 1), daily(1)))
        .unwrap();

    let day = d(2024, 3, 4);
    let existing = store.create_instance(&tpl.instance_for(day)).unwrap();
    assert_eq!(existing.parent_id, Some(tpl.id));

    // The store refuses a second row outright...
    let err = store.create_instance(&tpl.instance_for(day)).unwrap_err();
    assert!(matches!(err, Error::DuplicateInstance { .. }));

    // ...and the materializer treats the existing row as already done.
    let created = materialize(&store, "default", day).unwrap();
    assert!(created.is_empty());
    assert_eq!(store.find_in_range("default", day, day).unwrap().len(), 1);
}

#[test]
fn test_concurrent_materialize_creates_one_instance() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonStore::in_dir(dir.path()));
    store
        .create_task(&template("default", "Standup", d(2024, 3, 1), daily(1)))
        .unwrap();

    let day = d(2024, 3, 10);
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || materialize(&*store, "default", day).unwrap().len())
        })
        .collect();
    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(total, 1);
    assert_eq!(store.find_in_range("default", day, day).unwrap().len(), 1);
}

#[test]
fn test_materialize_is_scoped_to_owner() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    store
        .create_task(&template("alice", "Run", d(2024, 3, 1), daily(1)))
        .unwrap();

    assert!(materialize(&store, "bob", d(2024, 3, 10)).unwrap().is_empty());
    assert_eq!(materialize(&store, "alice", d(2024, 3, 10)).unwrap().len(), 1);
}

#[test]
fn test_plan_day_materializes_then_lists() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::in_dir(dir.path());
    store
        .create_task(&template("default", "Water plants", d(2024, 3, 1), daily(1)))
        .unwrap();

    let day = d(2024, 3, 10);
    let mut one_off = template("default", "Call plumber", day, daily(1));
    one_off.repeat = None;
    one_off.created_at = "2024-03-10T09:00:00+00:00".into();
    store.create_task(&one_off).unwrap();

    store
        .upsert_note(&DayNote {
            id: 0,
            owner: "default".into(),
            date: day,
            note: "Focus day".into(),
            reflection: String::new(),
            created_at: "2024-03-10T08:00:00+00:00".into(),
            updated_at: "2024-03-10T08:00:00+00:00".into(),
        })
        .unwrap();

    let plan = plan_day(&store, &store, "default", day).unwrap();
    assert_eq!(plan.tasks.len(), 2);
    // Newest first: the materialized instance was created just now,
    // after the one-off's stamped timestamp.
    assert_eq!(plan.tasks[1].title, "Call plumber");
    assert_eq!(plan.note.as_ref().map(|n| n.note.as_str()), Some("Focus day"));

    // A second read adds nothing.
    let plan = plan_day(&store, &store, "default", day).unwrap();
    assert_eq!(plan.tasks.len(), 2);
}
