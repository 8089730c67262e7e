use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::Habit;
use crate::storage::HabitStore;
use crate::streak;

/// Toggles a habit's completion for `today` and persists the updated
/// streak state.
///
/// The longest streak only ever grows: toggling today's completion back
/// off collapses the current streak to zero but leaves the high-water
/// mark where it was. The save goes through the store's optimistic
/// version check, so two concurrent toggles on one habit cannot both
/// apply; the loser gets `ConcurrentModification` and may retry.
pub fn toggle_completion(
    store: &dyn HabitStore,
    owner: &str,
    id: u64,
    today: NaiveDate,
) -> Result<Habit> {
    let mut habit = store
        .find_habit(owner, id)?
        .ok_or(Error::HabitNotFound { id })?;

    let outcome = streak::toggle(&habit.completion_history, habit.completions, today);
    habit.completion_history = outcome.history;
    habit.completions = outcome.completions;
    habit.current_streak = outcome.current_streak;
    habit.longest_streak = habit.longest_streak.max(outcome.current_streak);

    tracing::debug!(
        habit = habit.id,
        %today,
        checked = outcome.added,
        streak = habit.current_streak,
        "toggled habit completion"
    );
    store.save_habit(&habit)
}
