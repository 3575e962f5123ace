use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by tracker mutations.
///
/// Only not-found conditions reach the caller; storage failures are
/// logged inside the tracker and never abort an operation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrackerError {
    #[error("no meal at index {index} for {date}")]
    MealNotFound { date: NaiveDate, index: usize },

    #[error("no saved food at index {index}")]
    SavedFoodNotFound { index: usize },
}

/// Errors from a persistent store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt record {field}: {value}")]
    CorruptRecord { field: &'static str, value: String },
}
