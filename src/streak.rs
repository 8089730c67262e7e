use chrono::NaiveDate;

use crate::models::CompletionEntry;

/// Result of toggling a habit's completion for one day. The history is
/// a fresh sequence; the caller's copy is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub history: Vec<CompletionEntry>,
    pub completions: u32,
    pub current_streak: u32,
    /// True when the toggle checked the day off, false when it removed
    /// an existing completion.
    pub added: bool,
}

/// Toggles the completion entry for `today` and recomputes the streak.
///
/// Toggling off removes today's entry and collapses the current streak
/// to zero without recomputing from the remaining history; toggling on
/// appends an entry and walks consecutive days backward from today.
/// The longest-streak high-water mark is the caller's to apply, via
/// `max(longest, outcome.current_streak)`.
pub fn toggle(history: &[CompletionEntry], completions: u32, today: NaiveDate) -> ToggleOutcome {
    let checked_today = history.iter().any(|e| e.date == today);

    if checked_today {
        let history: Vec<CompletionEntry> = history
            .iter()
            .filter(|e| e.date != today)
            .cloned()
            .collect();
        return ToggleOutcome {
            history,
            completions: completions.saturating_sub(1),
            current_streak: 0,
            added: false,
        };
    }

    let mut history = history.to_vec();
    history.push(CompletionEntry {
        date: today,
        completed: true,
    });
    let current_streak = streak_ending(&history, today);
    ToggleOutcome {
        history,
        completions: completions + 1,
        current_streak,
        added: true,
    }
}

/// Counts consecutive completed days ending at `today`: sort the
/// history newest first, then step the cursor back one day per matching
/// entry and stop at the first gap.
fn streak_ending(history: &[CompletionEntry], today: NaiveDate) -> u32 {
    let mut sorted: Vec<&CompletionEntry> = history.iter().filter(|e| e.completed).collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    let mut cursor = today;
    for entry in sorted {
        if entry.date != cursor {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}
