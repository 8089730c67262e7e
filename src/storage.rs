use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{DayNote, Habit, Task};

/// Task repository the planner core runs against.
///
/// Instances are unique per `(owner, parent_id, date)`; `create_instance`
/// enforces that and fails with `DuplicateInstance` so a losing
/// concurrent creator never produces a second row.
pub trait TaskStore {
    /// All recurring templates for `owner` anchored on or before `day`.
    fn find_templates(&self, owner: &str, day: NaiveDate) -> Result<Vec<Task>>;
    /// The materialized instance of `template_id` on `day`, if any.
    fn find_instance(&self, owner: &str, template_id: u64, day: NaiveDate)
        -> Result<Option<Task>>;
    /// Persists a materialized instance, upholding the uniqueness
    /// invariant. Returns the stored record with its assigned id.
    fn create_instance(&self, task: &Task) -> Result<Task>;
    /// All tasks (templates included) dated within `[start, end]`.
    fn find_in_range(&self, owner: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Task>>;

    fn find_task(&self, owner: &str, id: u64) -> Result<Option<Task>>;
    fn create_task(&self, task: &Task) -> Result<Task>;
    fn update_task(&self, task: &Task) -> Result<()>;
    /// Removes a task. Deleting a template does not cascade to
    /// instances already materialized from it.
    fn delete_task(&self, owner: &str, id: u64) -> Result<bool>;
}

/// Habit repository. `save_habit` uses optimistic concurrency: the
/// stored version must match the incoming record's, and is bumped on
/// success.
pub trait HabitStore {
    fn find_habits(&self, owner: &str) -> Result<Vec<Habit>>;
    fn find_habit(&self, owner: &str, id: u64) -> Result<Option<Habit>>;
    fn create_habit(&self, habit: &Habit) -> Result<Habit>;
    fn save_habit(&self, habit: &Habit) -> Result<Habit>;
    fn delete_habit(&self, owner: &str, id: u64) -> Result<bool>;
}

/// Day-note repository. One note per `(owner, date)`; writes upsert.
pub trait NoteStore {
    fn find_note(&self, owner: &str, day: NaiveDate) -> Result<Option<DayNote>>;
    fn upsert_note(&self, note: &DayNote) -> Result<DayNote>;
    fn delete_note(&self, owner: &str, day: NaiveDate) -> Result<bool>;
}

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `DAYPLAN_DB` environment variable.
/// 2. `~/.local/share/dayplan/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
fn default_tasks_path() -> PathBuf {
    std::env::var("DAYPLAN_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("dayplan");
            if !p.exists() {
                let _ = fs::create_dir_all(&p);
            }
            p.push("tasks.json");
            p
        })
}

/// JSON-file store backing all three repositories. `habits.json` and
/// `notes.json` live next to `tasks.json`.
///
/// Every operation takes the internal lock across its whole
/// read-modify-write, so an `Arc<JsonStore>` shared between threads
/// behaves like a store with row-level constraints: the uniqueness
/// re-check in `create_instance` and the version check in `save_habit`
/// both run under the lock.
pub struct JsonStore {
    tasks_path: PathBuf,
    habits_path: PathBuf,
    notes_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Opens the store at the default (or `DAYPLAN_DB`-overridden) path.
    pub fn open_default() -> JsonStore {
        Self::at(default_tasks_path())
    }

    /// Opens a store whose files live in `dir`.
    pub fn in_dir(dir: &Path) -> JsonStore {
        Self::at(dir.join("tasks.json"))
    }

    fn at(tasks_path: PathBuf) -> JsonStore {
        let mut habits_path = tasks_path.clone();
        habits_path.pop();
        habits_path.push("habits.json");
        let mut notes_path = tasks_path.clone();
        notes_path.pop();
        notes_path.push("notes.json");
        JsonStore {
            tasks_path,
            habits_path,
            notes_path,
            lock: Mutex::new(()),
        }
    }

    /// Deletes all database files.
    pub fn delete_database(&self) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        for path in [&self.tasks_path, &self.habits_path, &self.notes_path] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// Loads all records from a store file. A missing or empty file is an
/// empty store; unreadable JSON is surfaced as `Corrupt`.
fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut f = OpenOptions::new().read(true).open(path)?;
    let mut s = String::new();
    f.read_to_string(&mut s)?;
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&s)?)
}

/// Overwrites a store file with the given records.
fn write_all<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let s = serde_json::to_string_pretty(records)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

fn next_task_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

fn next_habit_id(habits: &[Habit]) -> u64 {
    habits.iter().map(|h| h.id).max().unwrap_or(0) + 1
}

impl TaskStore for JsonStore {
    fn find_templates(&self, owner: &str, day: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.lock.lock().unwrap();
        let tasks: Vec<Task> = read_all(&self.tasks_path)?;
        Ok(tasks
            .into_iter()
            .filter(|t| t.owner == owner && t.is_template() && t.date <= day)
            .collect())
    }

    fn find_instance(
        &self,
        owner: &str,
        template_id: u64,
        day: NaiveDate,
    ) -> Result<Option<Task>> {
        let _guard = self.lock.lock().unwrap();
        let tasks: Vec<Task> = read_all(&self.tasks_path)?;
        Ok(tasks
            .into_iter()
            .find(|t| t.owner == owner && t.parent_id == Some(template_id) && t.date == day))
    }

    fn create_instance(&self, task: &Task) -> Result<Task> {
        let _guard = self.lock.lock().unwrap();
        let mut tasks: Vec<Task> = read_all(&self.tasks_path)?;
        if let Some(template_id) = task.parent_id {
            let exists = tasks.iter().any(|t| {
                t.owner == task.owner && t.parent_id == Some(template_id) && t.date == task.date
            });
            if exists {
                return Err(Error::DuplicateInstance {
                    template_id,
                    date: task.date,
                });
            }
        }
        let mut stored = task.clone();
        stored.id = next_task_id(&tasks);
        tasks.push(stored.clone());
        write_all(&self.tasks_path, &tasks)?;
        tracing::debug!(id = stored.id, %stored.date, "stored materialized instance");
        Ok(stored)
    }

    fn find_in_range(&self, owner: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.lock.lock().unwrap();
        let tasks: Vec<Task> = read_all(&self.tasks_path)?;
        Ok(tasks
            .into_iter()
            .filter(|t| t.owner == owner && t.date >= start && t.date <= end)
            .collect())
    }

    fn find_task(&self, owner: &str, id: u64) -> Result<Option<Task>> {
        let _guard = self.lock.lock().unwrap();
        let tasks: Vec<Task> = read_all(&self.tasks_path)?;
        Ok(tasks.into_iter().find(|t| t.owner == owner && t.id == id))
    }

    fn create_task(&self, task: &Task) -> Result<Task> {
        let _guard = self.lock.lock().unwrap();
        let mut tasks: Vec<Task> = read_all(&self.tasks_path)?;
        let mut stored = task.clone();
        stored.id = next_task_id(&tasks);
        tasks.push(stored.clone());
        write_all(&self.tasks_path, &tasks)?;
        Ok(stored)
    }

    fn update_task(&self, task: &Task) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut tasks: Vec<Task> = read_all(&self.tasks_path)?;
        match tasks
            .iter_mut()
            .find(|t| t.owner == task.owner && t.id == task.id)
        {
            Some(stored) => *stored = task.clone(),
            None => return Err(Error::TaskNotFound { id: task.id }),
        }
        write_all(&self.tasks_path, &tasks)
    }

    fn delete_task(&self, owner: &str, id: u64) -> Result<bool> {
        let _guard = self.lock.lock().unwrap();
        let mut tasks: Vec<Task> = read_all(&self.tasks_path)?;
        let len_before = tasks.len();
        tasks.retain(|t| !(t.owner == owner && t.id == id));
        if tasks.len() == len_before {
            return Ok(false);
        }
        write_all(&self.tasks_path, &tasks)?;
        Ok(true)
    }
}

impl HabitStore for JsonStore {
    fn find_habits(&self, owner: &str) -> Result<Vec<Habit>> {
        let _guard = self.lock.lock().unwrap();
        let habits: Vec<Habit> = read_all(&self.habits_path)?;
        Ok(habits.into_iter().filter(|h| h.owner == owner).collect())
    }

    fn find_habit(&self, owner: &str, id: u64) -> Result<Option<Habit>> {
        let _guard = self.lock.lock().unwrap();
        let habits: Vec<Habit> = read_all(&self.habits_path)?;
        Ok(habits.into_iter().find(|h| h.owner == owner && h.id == id))
    }

    fn create_habit(&self, habit: &Habit) -> Result<Habit> {
        let _guard = self.lock.lock().unwrap();
        let mut habits: Vec<Habit> = read_all(&self.habits_path)?;
        let mut stored = habit.clone();
        stored.id = next_habit_id(&habits);
        stored.version = 0;
        habits.push(stored.clone());
        write_all(&self.habits_path, &habits)?;
        Ok(stored)
    }

    fn save_habit(&self, habit: &Habit) -> Result<Habit> {
        let _guard = self.lock.lock().unwrap();
        let mut habits: Vec<Habit> = read_all(&self.habits_path)?;
        let stored = habits
            .iter_mut()
            .find(|h| h.owner == habit.owner && h.id == habit.id)
            .ok_or(Error::HabitNotFound { id: habit.id })?;
        if stored.version != habit.version {
            return Err(Error::ConcurrentModification { id: habit.id });
        }
        let mut updated = habit.clone();
        updated.version += 1;
        *stored = updated.clone();
        write_all(&self.habits_path, &habits)?;
        Ok(updated)
    }

    fn delete_habit(&self, owner: &str, id: u64) -> Result<bool> {
        let _guard = self.lock.lock().unwrap();
        let mut habits: Vec<Habit> = read_all(&self.habits_path)?;
        let len_before = habits.len();
        habits.retain(|h| !(h.owner == owner && h.id == id));
        if habits.len() == len_before {
            return Ok(false);
        }
        write_all(&self.habits_path, &habits)?;
        Ok(true)
    }
}

impl NoteStore for JsonStore {
    fn find_note(&self, owner: &str, day: NaiveDate) -> Result<Option<DayNote>> {
        let _guard = self.lock.lock().unwrap();
        let notes: Vec<DayNote> = read_all(&self.notes_path)?;
        Ok(notes
            .into_iter()
            .find(|n| n.owner == owner && n.date == day))
    }

    fn upsert_note(&self, note: &DayNote) -> Result<DayNote> {
        let _guard = self.lock.lock().unwrap();
        let mut notes: Vec<DayNote> = read_all(&self.notes_path)?;
        let stored = match notes
            .iter_mut()
            .find(|n| n.owner == note.owner && n.date == note.date)
        {
            Some(existing) => {
                existing.note = note.note.clone();
                existing.reflection = note.reflection.clone();
                existing.updated_at = note.updated_at.clone();
                existing.clone()
            }
            None => {
                let mut fresh = note.clone();
                fresh.id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
                notes.push(fresh.clone());
                fresh
            }
        };
        write_all(&self.notes_path, &notes)?;
        Ok(stored)
    }

    fn delete_note(&self, owner: &str, day: NaiveDate) -> Result<bool> {
        let _guard = self.lock.lock().unwrap();
        let mut notes: Vec<DayNote> = read_all(&self.notes_path)?;
        let len_before = notes.len();
        notes.retain(|n| !(n.owner == owner && n.date == day));
        if notes.len() == len_before {
            return Ok(false);
        }
        write_all(&self.notes_path, &notes)?;
        Ok(true)
    }
}
