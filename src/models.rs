use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring task template repeats.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every `interval` days.
    Daily,
    /// Every `interval` weeks' worth of weekdays (Monday through Friday).
    Weekdays,
    /// On the listed weekdays, every `interval` weeks.
    Weekly,
    /// On the anchor's day-of-month, every `interval` months.
    Monthly,
}

/// Recurrence rule attached to a task template.
///
/// The anchor the rule is measured from is the template's own `date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RepeatSpec {
    pub frequency: Frequency,
    /// Every N days/weeks/months. Minimum 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Last day the rule may produce an occurrence, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekday indices, 0 = Sunday through 6 = Saturday.
    /// Required (and non-empty) for weekly rules only.
    #[serde(default)]
    pub days_of_week: Option<Vec<u8>>,
}

fn default_interval() -> u32 {
    1
}

/// What counts as "done" for a task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    /// Done or not done.
    Binary,
    /// Done N times (reps, pages, glasses of water).
    Count { quantity: u32 },
    /// Done with a measured amount (minutes, kilometers).
    Value { value: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Reminder {
    #[serde(default)]
    pub enabled: bool,
    /// Time of day as "HH:MM", if set.
    #[serde(default)]
    pub time: Option<String>,
}

/// A planner task. One record type covers recurring templates (`repeat`
/// is set), one-off tasks, and instances materialized from a template
/// (`parent_id` is set).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// Owner the record is scoped to; every lookup filters by it.
    pub owner: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Anchor date for templates, the concrete calendar day otherwise.
    pub date: NaiveDate,
    pub kind: TaskKind,
    #[serde(default)]
    pub completed: bool,
    /// Timestamp of completion (ISO 8601), if completed.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Timestamp when the record was created (ISO 8601).
    pub created_at: String,
    /// Recurrence rule; present only on templates.
    #[serde(default)]
    pub repeat: Option<RepeatSpec>,
    /// Template this instance was materialized from, if any.
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reminder: Reminder,
    /// Planned duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl Task {
    /// A template defines occurrences; its own row is never completed.
    pub fn is_template(&self) -> bool {
        self.repeat.is_some()
    }

    /// Builds the concrete instance this template produces on `day`,
    /// copying the descriptive fields. The id is assigned by the store.
    pub fn instance_for(&self, day: NaiveDate) -> Task {
        Task {
            id: 0,
            owner: self.owner.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: day,
            kind: self.kind.clone(),
            completed: false,
            completed_at: None,
            created_at: Local::now().to_rfc3339(),
            repeat: None,
            parent_id: Some(self.id),
            priority: self.priority,
            tags: self.tags.clone(),
            reminder: self.reminder.clone(),
            duration: self.duration,
        }
    }
}

/// Informational cadence of a habit. Not consulted by the streak
/// calculator, which only looks at the completion history.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekdays,
    Weekly,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Anytime,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Monthly,
    Yearly,
    Custom,
}

/// Optional completion target attached to a habit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub kind: GoalKind,
    pub target: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// One checked-off day in a habit's history. At most one entry exists
/// per calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionEntry {
    pub date: NaiveDate,
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool {
    true
}

/// A tracked habit with its streak counters and completion log.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Habit {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub goal: Option<Goal>,
    /// Consecutive completed days ending today.
    #[serde(default)]
    pub current_streak: u32,
    /// High-water mark of `current_streak`; never decreases.
    #[serde(default)]
    pub longest_streak: u32,
    /// Number of currently-active completion entries.
    #[serde(default)]
    pub completions: u32,
    #[serde(default)]
    pub completion_history: Vec<CompletionEntry>,
    pub created_at: String,
    /// Optimistic-lock counter, bumped by the store on every save.
    #[serde(default)]
    pub version: u64,
}

impl Habit {
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.completion_history
            .iter()
            .any(|e| e.date == day && e.completed)
    }
}

/// Free-text note attached to a calendar day. One per owner and day;
/// writes are upserts.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DayNote {
    pub id: u64,
    pub owner: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub reflection: String,
    pub created_at: String,
    pub updated_at: String,
}
