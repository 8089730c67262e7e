use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{DayNote, Task};
use crate::recurrence;
use crate::storage::{NoteStore, TaskStore};

/// Everything the planner shows for one calendar day.
pub struct DayPlan {
    pub date: NaiveDate,
    /// The day's tasks, newest first.
    pub tasks: Vec<Task>,
    pub note: Option<DayNote>,
}

/// Creates the missing instances of `owner`'s recurring templates for
/// `day` and returns the newly created ones.
///
/// Calling this twice for the same `(owner, day)` is a no-op the second
/// time: an instance that already exists is skipped, and a
/// `DuplicateInstance` failure from the store (a concurrent planner
/// read won the race) is treated the same way.
pub fn materialize(store: &dyn TaskStore, owner: &str, day: NaiveDate) -> Result<Vec<Task>> {
    let templates = store.find_templates(owner, day)?;
    let mut created = Vec::new();

    for template in templates {
        let Some(spec) = template.repeat.as_ref() else {
            continue;
        };
        // Rule expired before the target day.
        if spec.end_date.is_some_and(|end| end < day) {
            continue;
        }
        if !recurrence::matches(day, template.date, spec) {
            continue;
        }
        if store.find_instance(owner, template.id, day)?.is_some() {
            continue;
        }
        match store.create_instance(&template.instance_for(day)) {
            Ok(instance) => created.push(instance),
            Err(Error::DuplicateInstance { template_id, date }) => {
                tracing::debug!(template_id, %date, "instance created concurrently, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(owner, %day, created = created.len(), "materialized recurring instances");
    Ok(created)
}

/// Assembles the planner view for one day: materialize first, then read
/// back the day's tasks and note. The materialize-before-read order is
/// what the idempotency guarantee hangs on, since every planner read
/// triggers materialization.
pub fn plan_day(
    tasks: &dyn TaskStore,
    notes: &dyn NoteStore,
    owner: &str,
    day: NaiveDate,
) -> Result<DayPlan> {
    materialize(tasks, owner, day)?;

    let mut day_tasks = tasks.find_in_range(owner, day, day)?;
    day_tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let note = notes.find_note(owner, day)?;

    Ok(DayPlan {
        date: day,
        tasks: day_tasks,
        note,
    })
}
