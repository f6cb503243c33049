//! Error types for board operations.

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors reported by board operations.
///
/// A board operation that returns one of these has left the board exactly as
/// it was before the call.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Column id not present on the board or active sprint
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task id not found, or not at the claimed position
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Sprint id not present on the scrum board
    #[error("sprint not found: {id}")]
    SprintNotFound { id: String },

    /// Task id already present somewhere on the board
    #[error("duplicate task ID: {id}")]
    DuplicateTask { id: String },

    /// Index is not a valid insertion point for the column
    #[error("position {index} is out of range for column '{column}' ({len} tasks)")]
    InvalidPosition { column: String, index: usize, len: usize },

    /// Comment text was blank
    #[error("comment on {id} is empty")]
    EmptyComment { id: String },

    /// Team value not present in the team list
    #[error("team not found: {value}")]
    TeamNotFound { value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    pub fn column_not_found(id: impl Into<String>) -> Self {
        Self::ColumnNotFound { id: id.into() }
    }

    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    pub fn sprint_not_found(id: impl Into<String>) -> Self {
        Self::SprintNotFound { id: id.into() }
    }
}
