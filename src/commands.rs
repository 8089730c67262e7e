use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::error::Error;
use crate::habits;
use crate::models::{
    DayNote, Frequency, Goal, GoalKind, Habit, HabitFrequency, Priority, Reminder, RepeatSpec,
    Task, TaskKind, TimeOfDay,
};
use crate::planner;
use crate::recurrence;
use crate::storage::{HabitStore, JsonStore, NoteStore, TaskStore};

/// Input for `cmd_add`, mirroring the CLI flags.
pub struct NewTask {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub count: Option<u32>,
    pub value: Option<f64>,
    pub priority: Option<String>,
    pub tags: Vec<String>,
    pub duration: Option<u32>,
    pub remind: Option<String>,
    pub repeat: Option<String>,
    pub every: u32,
    pub until: Option<String>,
    pub on: Option<String>,
}

/// Input for `cmd_habit_add`, mirroring the CLI flags.
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub goal: Option<String>,
    pub goal_target: Option<u32>,
    pub goal_date: Option<String>,
}

fn parse_date(s: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent {
                eprintln!("Invalid date '{}': {}. Use YYYY-MM-DD.", s, e);
            }
            None
        }
    }
}

fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn parse_days_of_week(s: &str) -> Result<Vec<u8>, String> {
    let mut days = Vec::new();
    for part in s.split(',') {
        let day = match part.trim().to_lowercase().as_str() {
            "sun" | "sunday" | "0" => 0,
            "mon" | "monday" | "1" => 1,
            "tue" | "tuesday" | "2" => 2,
            "wed" | "wednesday" | "3" => 3,
            "thu" | "thursday" | "4" => 4,
            "fri" | "friday" | "5" => 5,
            "sat" | "saturday" | "6" => 6,
            other => return Err(format!("Unknown weekday '{}'.", other)),
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// Builds and validates the repeat rule from the CLI flags, if any.
fn build_repeat(
    repeat: Option<String>,
    every: u32,
    until: Option<String>,
    on: Option<String>,
    silent: bool,
) -> Result<Option<RepeatSpec>, ()> {
    let Some(freq) = repeat else {
        if on.is_some() || until.is_some() {
            if !silent {
                eprintln!("--on and --until only make sense together with --repeat.");
            }
            return Err(());
        }
        return Ok(None);
    };

    let frequency = match freq.to_lowercase().as_str() {
        "daily" => Frequency::Daily,
        "weekdays" => Frequency::Weekdays,
        "weekly" => Frequency::Weekly,
        "monthly" => Frequency::Monthly,
        other => {
            if !silent {
                eprintln!(
                    "Unknown repeat frequency '{}'. Supported: daily, weekdays, weekly, monthly.",
                    other
                );
            }
            return Err(());
        }
    };

    let end_date = match until {
        Some(u) => match parse_date(&u, silent) {
            Some(d) => Some(d),
            None => return Err(()),
        },
        None => None,
    };

    let days_of_week = match on {
        Some(list) => match parse_days_of_week(&list) {
            Ok(days) => Some(days),
            Err(msg) => {
                if !silent {
                    eprintln!("{}", msg);
                }
                return Err(());
            }
        },
        None => None,
    };

    let spec = RepeatSpec {
        frequency,
        interval: every,
        end_date,
        days_of_week,
    };
    if let Err(e) = recurrence::validate(&spec) {
        if !silent {
            eprintln!("{}", e);
        }
        return Err(());
    }
    Ok(Some(spec))
}

fn build_kind(count: Option<u32>, value: Option<f64>, silent: bool) -> Result<TaskKind, ()> {
    match (count, value) {
        (Some(_), Some(_)) => {
            if !silent {
                eprintln!("--count and --value are mutually exclusive.");
            }
            Err(())
        }
        (Some(0), None) => {
            if !silent {
                eprintln!("--count must be greater than 0.");
            }
            Err(())
        }
        (Some(quantity), None) => Ok(TaskKind::Count { quantity }),
        (None, Some(value)) => Ok(TaskKind::Value { value }),
        (None, None) => Ok(TaskKind::Binary),
    }
}

fn kind_label(kind: &TaskKind) -> String {
    match kind {
        TaskKind::Binary => "binary".into(),
        TaskKind::Count { quantity } => format!("count x{}", quantity),
        TaskKind::Value { value } => format!("value {}", value),
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

fn repeat_label(task: &Task) -> String {
    if let Some(spec) = &task.repeat {
        let freq = match spec.frequency {
            Frequency::Daily => "daily",
            Frequency::Weekdays => "weekdays",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        if spec.interval > 1 {
            format!("{}/{}", freq, spec.interval)
        } else {
            freq.into()
        }
    } else if let Some(parent) = task.parent_id {
        format!("from #{}", parent)
    } else {
        "-".into()
    }
}

/// Adds a new task. With `--repeat` the task becomes a recurring
/// template; its date is the anchor the rule is measured from.
pub fn cmd_add(store: &JsonStore, owner: &str, input: NewTask, silent: bool) {
    let Some(date) = parse_date(&input.date, silent) else {
        return;
    };
    let Ok(kind) = build_kind(input.count, input.value, silent) else {
        return;
    };
    let priority = match &input.priority {
        Some(p) => match parse_priority(p) {
            Some(priority) => priority,
            None => {
                if !silent {
                    eprintln!("Unknown priority '{}'. Supported: low, medium, high.", p);
                }
                return;
            }
        },
        None => Priority::default(),
    };
    let Ok(repeat) = build_repeat(input.repeat, input.every, input.until, input.on, silent) else {
        return;
    };
    let reminder = match input.remind {
        Some(time) => Reminder {
            enabled: true,
            time: Some(time),
        },
        None => Reminder::default(),
    };

    let task = Task {
        id: 0,
        owner: owner.into(),
        title: input.title,
        description: input.description.unwrap_or_default(),
        date,
        kind,
        completed: false,
        completed_at: None,
        created_at: Local::now().to_rfc3339(),
        repeat,
        parent_id: None,
        priority,
        tags: input.tags,
        reminder,
        duration: input.duration,
    };

    match store.create_task(&task) {
        Ok(stored) => {
            if !silent {
                if stored.is_template() {
                    println!("Recurring task added (id = {})", stored.id);
                } else {
                    println!("Task added (id = {})", stored.id);
                }
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save task: {}", e);
            }
        }
    }
}

/// Shows the planner for one day: materializes due recurring instances
/// first, then prints the day's tasks and note.
pub fn cmd_plan(store: &JsonStore, owner: &str, date: Option<String>, silent: bool) {
    let day = match date {
        Some(d) => match parse_date(&d, silent) {
            Some(d) => d,
            None => return,
        },
        None => Local::now().date_naive(),
    };

    let plan = match planner::plan_day(store, store, owner, day) {
        Ok(plan) => plan,
        Err(e) => {
            if !silent {
                eprintln!("Failed to build plan for {}: {}", day, e);
            }
            return;
        }
    };

    if silent {
        return;
    }

    if plan.tasks.is_empty() {
        println!("No tasks for {}.", day);
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ID").add_attribute(Attribute::Bold),
                Cell::new("Title").add_attribute(Attribute::Bold),
                Cell::new("Kind").add_attribute(Attribute::Bold),
                Cell::new("Priority").add_attribute(Attribute::Bold),
                Cell::new("Min").add_attribute(Attribute::Bold),
                Cell::new("Repeat").add_attribute(Attribute::Bold),
                Cell::new("Status").add_attribute(Attribute::Bold),
            ]);

        for t in &plan.tasks {
            let (status, status_color) = if t.is_template() {
                ("Template", Color::Grey)
            } else if t.completed {
                ("Done", Color::Green)
            } else {
                ("Pending", Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(t.id),
                Cell::new(&t.title),
                Cell::new(kind_label(&t.kind)),
                Cell::new(priority_label(t.priority)),
                Cell::new(t.duration.map(|d| d.to_string()).unwrap_or_default()),
                Cell::new(repeat_label(t)),
                Cell::new(status).fg(status_color),
            ]);
        }
        println!("{table}");
    }

    if let Some(note) = &plan.note {
        if !note.note.is_empty() {
            println!("Note: {}", note.note);
        }
        if !note.reflection.is_empty() {
            println!("Reflection: {}", note.reflection);
        }
    }
}

/// Lists tasks in a date range (default: today through a week out).
pub fn cmd_list(
    store: &JsonStore,
    owner: &str,
    from: Option<String>,
    to: Option<String>,
    all: bool,
) {
    let (start, end) = if all {
        (NaiveDate::MIN, NaiveDate::MAX)
    } else {
        let today = Local::now().date_naive();
        let start = match from {
            Some(f) => match parse_date(&f, false) {
                Some(d) => d,
                None => return,
            },
            None => today,
        };
        let end = match to {
            Some(t) => match parse_date(&t, false) {
                Some(d) => d,
                None => return,
            },
            None => start + chrono::Duration::days(7),
        };
        (start, end)
    };

    let mut tasks = match store.find_in_range(owner, start, end) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Failed to load tasks: {}", e);
            return;
        }
    };
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    tasks.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Date").add_attribute(Attribute::Bold),
            Cell::new("Kind").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Repeat").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in &tasks {
        let (status, status_color) = if t.is_template() {
            ("Template", Color::Grey)
        } else if t.completed {
            ("Done", Color::Green)
        } else {
            ("Pending", Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(t.date),
            Cell::new(kind_label(&t.kind)),
            Cell::new(priority_label(t.priority)),
            Cell::new(repeat_label(t)),
            Cell::new(status).fg(status_color),
        ]);
    }
    println!("{table}");
}

/// Toggles a task's completion. Recurring templates are refused; only
/// their materialized instances are completable.
pub fn cmd_complete(store: &JsonStore, owner: &str, id: u64, silent: bool) {
    let mut task = match store.find_task(owner, id) {
        Ok(Some(task)) => task,
        Ok(None) => {
            if !silent {
                eprintln!("Task {} not found.", id);
            }
            return;
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to load task: {}", e);
            }
            return;
        }
    };

    if task.is_template() {
        if !silent {
            eprintln!(
                "Task {} is a recurring template; complete today's instance instead.",
                id
            );
        }
        return;
    }

    task.completed = !task.completed;
    task.completed_at = if task.completed {
        Some(Local::now().to_rfc3339())
    } else {
        None
    };

    match store.update_task(&task) {
        Ok(()) => {
            if !silent {
                if task.completed {
                    println!("Task {} marked as complete.", id);
                } else {
                    println!("Task {} marked as not complete.", id);
                }
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save task: {}", e);
            }
        }
    }
}

/// Removes a task by ID. Removing a template leaves its already
/// materialized instances in place.
pub fn cmd_remove(store: &JsonStore, owner: &str, id: u64, silent: bool) {
    match store.delete_task(owner, id) {
        Ok(true) => {
            if !silent {
                println!("Task {} removed.", id);
            }
        }
        Ok(false) => {
            if !silent {
                eprintln!("Task {} not found.", id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to remove task: {}", e);
            }
        }
    }
}

/// Edits an existing task's details.
#[allow(clippy::too_many_arguments)]
pub fn cmd_edit(
    store: &JsonStore,
    owner: &str,
    id: u64,
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    priority: Option<String>,
    count: Option<u32>,
    value: Option<f64>,
    duration: Option<u32>,
    silent: bool,
) {
    let mut task = match store.find_task(owner, id) {
        Ok(Some(task)) => task,
        Ok(None) => {
            if !silent {
                eprintln!("Task {} not found.", id);
            }
            return;
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to load task: {}", e);
            }
            return;
        }
    };

    if let Some(t) = title {
        task.title = t;
    }
    if let Some(d) = description {
        task.description = d;
    }
    if let Some(d) = date {
        match parse_date(&d, silent) {
            Some(date) => task.date = date,
            None => return,
        }
    }
    if let Some(p) = priority {
        match parse_priority(&p) {
            Some(priority) => task.priority = priority,
            None => {
                if !silent {
                    eprintln!("Unknown priority '{}'. Supported: low, medium, high.", p);
                }
                return;
            }
        }
    }
    if count.is_some() || value.is_some() {
        match build_kind(count, value, silent) {
            Ok(kind) => task.kind = kind,
            Err(()) => return,
        }
    }
    if let Some(d) = duration {
        task.duration = Some(d);
    }

    match store.update_task(&task) {
        Ok(()) => {
            if !silent {
                println!("Task {} updated.", id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save task: {}", e);
            }
        }
    }
}

fn parse_habit_frequency(s: &str) -> Option<HabitFrequency> {
    match s.to_lowercase().as_str() {
        "daily" => Some(HabitFrequency::Daily),
        "weekdays" => Some(HabitFrequency::Weekdays),
        "weekly" => Some(HabitFrequency::Weekly),
        _ => None,
    }
}

fn parse_time_of_day(s: &str) -> Option<TimeOfDay> {
    match s.to_lowercase().as_str() {
        "morning" => Some(TimeOfDay::Morning),
        "afternoon" => Some(TimeOfDay::Afternoon),
        "evening" => Some(TimeOfDay::Evening),
        "anytime" => Some(TimeOfDay::Anytime),
        _ => None,
    }
}

/// Builds the optional goal from the CLI flags. `--goal none` clears.
fn build_goal(
    goal: Option<String>,
    target: Option<u32>,
    date: Option<String>,
    silent: bool,
) -> Result<Option<Goal>, ()> {
    let Some(kind_str) = goal else {
        return Ok(None);
    };
    let kind = match kind_str.to_lowercase().as_str() {
        "none" => return Ok(None),
        "monthly" => GoalKind::Monthly,
        "yearly" => GoalKind::Yearly,
        "custom" => GoalKind::Custom,
        other => {
            if !silent {
                eprintln!(
                    "Unknown goal type '{}'. Supported: none, monthly, yearly, custom.",
                    other
                );
            }
            return Err(());
        }
    };
    let Some(target) = target else {
        if !silent {
            eprintln!("--goal-target is required when a goal type is set.");
        }
        return Err(());
    };
    let date = match date {
        Some(d) => match parse_date(&d, silent) {
            Some(d) => Some(d),
            None => return Err(()),
        },
        None => None,
    };
    Ok(Some(Goal { kind, target, date }))
}

/// Adds a new habit.
pub fn cmd_habit_add(store: &JsonStore, owner: &str, input: NewHabit, silent: bool) {
    let frequency = match &input.frequency {
        Some(f) => match parse_habit_frequency(f) {
            Some(frequency) => frequency,
            None => {
                if !silent {
                    eprintln!(
                        "Unknown habit frequency '{}'. Supported: daily, weekdays, weekly.",
                        f
                    );
                }
                return;
            }
        },
        None => HabitFrequency::default(),
    };
    let time_of_day = match &input.time {
        Some(t) => match parse_time_of_day(t) {
            Some(time) => time,
            None => {
                if !silent {
                    eprintln!(
                        "Unknown time of day '{}'. Supported: morning, afternoon, evening, anytime.",
                        t
                    );
                }
                return;
            }
        },
        None => TimeOfDay::default(),
    };
    let Ok(goal) = build_goal(input.goal, input.goal_target, input.goal_date, silent) else {
        return;
    };

    let habit = Habit {
        id: 0,
        owner: owner.into(),
        name: input.name,
        description: input.description.unwrap_or_default(),
        frequency,
        time_of_day,
        goal,
        current_streak: 0,
        longest_streak: 0,
        completions: 0,
        completion_history: Vec::new(),
        created_at: Local::now().to_rfc3339(),
        version: 0,
    };

    match store.create_habit(&habit) {
        Ok(stored) => {
            if !silent {
                println!("Habit '{}' added (id = {})", stored.name, stored.id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save habit: {}", e);
            }
        }
    }
}

/// Lists all habits with their streak counters.
pub fn cmd_habit_list(store: &JsonStore, owner: &str) {
    let habits = match store.find_habits(owner) {
        Ok(habits) => habits,
        Err(e) => {
            eprintln!("Failed to load habits: {}", e);
            return;
        }
    };
    if habits.is_empty() {
        println!("No habits found.");
        return;
    }

    let today = Local::now().date_naive();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Frequency").add_attribute(Attribute::Bold),
            Cell::new("Today").add_attribute(Attribute::Bold),
            Cell::new("Streak").add_attribute(Attribute::Bold),
            Cell::new("Best").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
        ]);

    for h in &habits {
        let (today_mark, mark_color) = if h.completed_on(today) {
            ("done", Color::Green)
        } else {
            ("-", Color::Reset)
        };
        let freq = match h.frequency {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekdays => "weekdays",
            HabitFrequency::Weekly => "weekly",
        };
        table.add_row(vec![
            Cell::new(h.id),
            Cell::new(&h.name),
            Cell::new(freq),
            Cell::new(today_mark).fg(mark_color),
            Cell::new(h.current_streak),
            Cell::new(h.longest_streak),
            Cell::new(h.completions),
        ]);
    }
    println!("{table}");
}

/// Toggles a habit's completion for today and reports the streak.
pub fn cmd_habit_toggle(store: &JsonStore, owner: &str, id: u64, silent: bool) {
    let today = Local::now().date_naive();
    match habits::toggle_completion(store, owner, id, today) {
        Ok(habit) => {
            if !silent {
                if habit.completed_on(today) {
                    println!(
                        "Habit '{}' checked off. Streak: {} day(s), best {}.",
                        habit.name, habit.current_streak, habit.longest_streak
                    );
                } else {
                    println!(
                        "Removed today's completion for '{}'. Streak reset, best {} kept.",
                        habit.name, habit.longest_streak
                    );
                }
            }
        }
        Err(Error::ConcurrentModification { .. }) => {
            if !silent {
                eprintln!("Habit {} was updated concurrently; try again.", id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to toggle habit: {}", e);
            }
        }
    }
}

/// Edits an existing habit's details.
#[allow(clippy::too_many_arguments)]
pub fn cmd_habit_edit(
    store: &JsonStore,
    owner: &str,
    id: u64,
    name: Option<String>,
    description: Option<String>,
    frequency: Option<String>,
    time: Option<String>,
    goal: Option<String>,
    goal_target: Option<u32>,
    goal_date: Option<String>,
    silent: bool,
) {
    let mut habit = match store.find_habit(owner, id) {
        Ok(Some(habit)) => habit,
        Ok(None) => {
            if !silent {
                eprintln!("Habit {} not found.", id);
            }
            return;
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to load habit: {}", e);
            }
            return;
        }
    };

    if let Some(n) = name {
        habit.name = n;
    }
    if let Some(d) = description {
        habit.description = d;
    }
    if let Some(f) = frequency {
        match parse_habit_frequency(&f) {
            Some(frequency) => habit.frequency = frequency,
            None => {
                if !silent {
                    eprintln!(
                        "Unknown habit frequency '{}'. Supported: daily, weekdays, weekly.",
                        f
                    );
                }
                return;
            }
        }
    }
    if let Some(t) = time {
        match parse_time_of_day(&t) {
            Some(time) => habit.time_of_day = time,
            None => {
                if !silent {
                    eprintln!(
                        "Unknown time of day '{}'. Supported: morning, afternoon, evening, anytime.",
                        t
                    );
                }
                return;
            }
        }
    }
    if goal.is_some() {
        match build_goal(goal, goal_target, goal_date, silent) {
            Ok(g) => habit.goal = g,
            Err(()) => return,
        }
    }

    match store.save_habit(&habit) {
        Ok(_) => {
            if !silent {
                println!("Habit {} updated.", id);
            }
        }
        Err(Error::ConcurrentModification { .. }) => {
            if !silent {
                eprintln!("Habit {} was updated concurrently; try again.", id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save habit: {}", e);
            }
        }
    }
}

/// Removes a habit by ID.
pub fn cmd_habit_remove(store: &JsonStore, owner: &str, id: u64, silent: bool) {
    match store.delete_habit(owner, id) {
        Ok(true) => {
            if !silent {
                println!("Habit {} removed.", id);
            }
        }
        Ok(false) => {
            if !silent {
                eprintln!("Habit {} not found.", id);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to remove habit: {}", e);
            }
        }
    }
}

/// Creates or updates the note for a day. Fields not given keep their
/// current value.
pub fn cmd_note_set(
    store: &JsonStore,
    owner: &str,
    date: Option<String>,
    note: Option<String>,
    reflection: Option<String>,
    silent: bool,
) {
    let day = match date {
        Some(d) => match parse_date(&d, silent) {
            Some(d) => d,
            None => return,
        },
        None => Local::now().date_naive(),
    };

    let now = Local::now().to_rfc3339();
    let record = match store.find_note(owner, day) {
        Ok(Some(mut existing)) => {
            if let Some(n) = note {
                existing.note = n;
            }
            if let Some(r) = reflection {
                existing.reflection = r;
            }
            existing.updated_at = now;
            existing
        }
        Ok(None) => DayNote {
            id: 0,
            owner: owner.into(),
            date: day,
            note: note.unwrap_or_default(),
            reflection: reflection.unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        },
        Err(e) => {
            if !silent {
                eprintln!("Failed to load note: {}", e);
            }
            return;
        }
    };

    match store.upsert_note(&record) {
        Ok(_) => {
            if !silent {
                println!("Note for {} saved.", day);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to save note: {}", e);
            }
        }
    }
}

/// Prints the note for a day.
pub fn cmd_note_show(store: &JsonStore, owner: &str, date: Option<String>) {
    let day = match date {
        Some(d) => match parse_date(&d, false) {
            Some(d) => d,
            None => return,
        },
        None => Local::now().date_naive(),
    };
    match store.find_note(owner, day) {
        Ok(Some(note)) => {
            println!("{}", day);
            if !note.note.is_empty() {
                println!("Note: {}", note.note);
            }
            if !note.reflection.is_empty() {
                println!("Reflection: {}", note.reflection);
            }
        }
        Ok(None) => println!("No note for {}.", day),
        Err(e) => eprintln!("Failed to load note: {}", e),
    }
}

/// Removes the note for a day.
pub fn cmd_note_remove(store: &JsonStore, owner: &str, date: Option<String>, silent: bool) {
    let day = match date {
        Some(d) => match parse_date(&d, silent) {
            Some(d) => d,
            None => return,
        },
        None => Local::now().date_naive(),
    };
    match store.delete_note(owner, day) {
        Ok(true) => {
            if !silent {
                println!("Note for {} removed.", day);
            }
        }
        Ok(false) => {
            if !silent {
                eprintln!("No note for {}.", day);
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("Failed to remove note: {}", e);
            }
        }
    }
}

/// Resets the database by deleting all tasks, habits and notes.
pub fn cmd_reset(store: &JsonStore, force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks, habits and notes? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = store.delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
