//! # Dayplan
//!
//! A terminal daily planner and habit tracker written in Rust. Dayplan tracks one-off and recurring tasks, answers "what is due today" for any date, and keeps consecutive-day streaks for your habits.
//!
//! ## Features
//!
//! *   **Recurring Tasks**: daily, weekdays, weekly and monthly repeat rules with custom intervals, end dates and weekday selections.
//! *   **On-demand Materialization**: opening the planner for a date creates that day's instances of your recurring tasks, exactly once, no matter how often you look.
//! *   **Habit Streaks**: check habits off day by day; current and longest streaks are tracked from the completion history.
//! *   **Day Notes**: attach a note and a reflection to any calendar day.
//! *   **Data Persistence**: everything is stored in standard XDG data directories (JSON format).
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! **Tasks**
//! ```bash
//! # One-off task
//! dayplan add "Write report" --date 2026-09-01 --priority high
//!
//! # Count task (5 reps)
//! dayplan add "Stretching" --date 2026-09-01 --count 5
//!
//! # Recurring task: every other day from the anchor date
//! dayplan add "Water plants" --date 2026-09-01 --repeat daily --every 2
//!
//! # Recurring task: Mondays and Thursdays, every week, until end of year
//! dayplan add "Gym" --date 2026-09-01 --repeat weekly --on mon,thu --until 2026-12-31
//!
//! # Today's plan (materializes recurring instances, then lists them)
//! dayplan plan
//! dayplan plan --date 2026-09-03
//!
//! # Complete / uncomplete a task
//! dayplan complete 4
//! ```
//!
//! **Habits**
//! ```bash
//! dayplan habit add "Meditate" --time morning
//! dayplan habit toggle 1
//! dayplan habit list
//! ```
//!
//! **Notes**
//! ```bash
//! dayplan note set --note "Good focus day" --reflection "Start earlier"
//! dayplan note show --date 2026-09-03
//! ```
//!
//! ## Data Storage
//!
//! Records are saved in your local data directory:
//! *   Linux: `~/.local/share/dayplan/`
//! *   macOS: `~/Library/Application Support/dayplan/`
//! *   Windows: `%APPDATA%\dayplan\`
//!
//! You can override the tasks file path (siblings are derived from it) by setting the `DAYPLAN_DB` environment variable.
//!
//! ## Recurrence Semantics
//!
//! A recurring task's own row is the template; it is never completed itself. The template's date is the anchor the rule is measured from, and occurrences only fall strictly after it. Each frequency measures distance in its own unit: days for `daily`, counted weekdays for `weekdays`, weeks for `weekly`, and calendar months for `monthly` (a task anchored on the 31st skips shorter months).

pub mod commands;
pub mod error;
pub mod habits;
pub mod models;
pub mod planner;
pub mod recurrence;
pub mod storage;
pub mod streak;
