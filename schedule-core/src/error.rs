//! Error types for the schedule store.

use thiserror::Error;

/// Errors that can occur in schedule operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A persisted record or file could not be interpreted.
    #[error("Data error: {0}")]
    Data(String),

    /// The id counter has reached `u64::MAX`.
    #[error("No event ids left to assign")]
    IdsExhausted,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
