//! Enumerations for TUI state management.

/// What the board view is currently showing on top of the columns.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    Board,
    TaskDetail,
    /// Writing a comment on the task shown in the detail popup.
    Comment,
    AddTask,
    EditTask,
    Help,
    Confirm,
}

/// A delete waiting for confirmation.
#[derive(Clone, PartialEq, Debug)]
pub struct PendingDelete {
    pub task_id: String,
    pub title: String,
    pub column_id: String,
    /// Set on Scrum boards, where deletes name their sprint.
    pub sprint_id: Option<String>,
}
