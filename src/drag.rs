//! Drop events.
//!
//! Whatever turns gestures into moves (the terminal view, a replay script)
//! reports a finished drag as a [`DragResult`] and hands it to
//! [`apply_drop`]. Nothing here knows about pointers, keys or geometry.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{BoardOps, MoveOutcome};
use crate::error::Result;

/// A slot on the board: column and index within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLocation {
    pub column_id: String,
    pub index: usize,
}

impl DropLocation {
    pub fn new(column_id: impl Into<String>, index: usize) -> Self {
        DropLocation {
            column_id: column_id.into(),
            index,
        }
    }
}

/// The end of a drag: which task, where it was picked up, and where it was
/// released. No destination means the drag was released outside any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub task_id: String,
    pub source: DropLocation,
    #[serde(default)]
    pub destination: Option<DropLocation>,
}

/// What a drop did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    Unchanged,
    Cancelled,
}

/// Apply a finished drag to the board.
pub fn apply_drop<B: BoardOps + ?Sized>(board: &mut B, drop: &DragResult) -> Result<DropOutcome> {
    let Some(dest) = drop.destination.as_ref() else {
        debug!(task = %drop.task_id, "drop cancelled");
        return Ok(DropOutcome::Cancelled);
    };

    let outcome = board
        .move_task(
            &drop.task_id,
            &drop.source.column_id,
            drop.source.index,
            &dest.column_id,
            dest.index,
        )
        .inspect_err(|e| warn!(task = %drop.task_id, error = %e, "drop rejected"))?;

    Ok(match outcome {
        MoveOutcome::Moved => DropOutcome::Moved,
        MoveOutcome::Unchanged => DropOutcome::Unchanged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::seed;
    use crate::board::KanbanBoard;
    use crate::context::Team;
    use crate::error::BoardError;

    fn board() -> KanbanBoard {
        KanbanBoard::new(
            Team::new("Development", "development"),
            &seed(&[("todo", &["a", "b"]), ("in-progress", &["c"])]),
        )
    }

    fn drag(task: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DragResult {
        DragResult {
            task_id: task.to_string(),
            source: DropLocation::new(from.0, from.1),
            destination: to.map(|(c, i)| DropLocation::new(c, i)),
        }
    }

    #[test]
    fn test_drop_moves_task() {
        let mut b = board();
        let outcome = apply_drop(&mut b, &drag("b", ("todo", 1), Some(("in-progress", 0)))).unwrap();
        assert_eq!(outcome, DropOutcome::Moved);
        assert_eq!(b.columns()[1].task_ids(), vec!["b", "c"]);
    }

    #[test]
    fn test_drop_outside_board_is_cancelled() {
        let mut b = board();
        let before = b.column_set().clone();
        let outcome = apply_drop(&mut b, &drag("a", ("todo", 0), None)).unwrap();
        assert_eq!(outcome, DropOutcome::Cancelled);
        assert_eq!(b.column_set(), &before);
    }

    #[test]
    fn test_drop_on_origin_is_unchanged() {
        let mut b = board();
        let outcome = apply_drop(&mut b, &drag("a", ("todo", 0), Some(("todo", 0)))).unwrap();
        assert_eq!(outcome, DropOutcome::Unchanged);
    }

    #[test]
    fn test_stale_drop_is_reported() {
        let mut b = board();
        let before = b.column_set().clone();
        let err = apply_drop(&mut b, &drag("a", ("todo", 1), Some(("done", 0)))).unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
        assert_eq!(b.column_set(), &before);
    }

    #[test]
    fn test_drop_from_json() {
        let json = r#"{"task_id": "c", "source": {"column_id": "in-progress", "index": 0},
                       "destination": {"column_id": "done", "index": 0}}"#;
        let d: DragResult = serde_json::from_str(json).unwrap();
        let mut b = board();
        assert_eq!(apply_drop(&mut b, &d).unwrap(), DropOutcome::Moved);
        assert_eq!(b.columns()[3].task_ids(), vec!["c"]);
    }
}
