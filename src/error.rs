use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the planner core and its stores.
///
/// `DuplicateInstance` is recovered inside the materializer (a losing
/// concurrent creator is a benign no-op); `ConcurrentModification` is
/// retryable by the caller. Everything else passes through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("task {id} not found")]
    TaskNotFound { id: u64 },

    #[error("habit {id} not found")]
    HabitNotFound { id: u64 },

    #[error("invalid repeat rule: {reason}")]
    InvalidRepeatSpec { reason: String },

    #[error("instance of template {template_id} already exists on {date}")]
    DuplicateInstance { template_id: u64, date: NaiveDate },

    #[error("habit {id} was modified concurrently; reload and retry")]
    ConcurrentModification { id: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
