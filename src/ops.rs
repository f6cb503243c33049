//! Board operations as data.
//!
//! `AnyBoard` is the board variant the CLI and terminal view hold, and
//! `BoardOp` is one recorded request against it. Replay scripts are JSON
//! arrays of `BoardOp`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{BoardOps, KanbanBoard, MoveOutcome};
use crate::column::Column;
use crate::context::Team;
use crate::drag::{apply_drop, DragResult, DropOutcome};
use crate::error::{BoardError, Result};
use crate::fields::{BoardKind, Phase};
use crate::scrum::ScrumBoard;
use crate::seed::SeedCatalog;
use crate::task::Task;

/// Either board variant.
#[derive(Debug, Clone)]
pub enum AnyBoard {
    Kanban(KanbanBoard),
    Scrum(ScrumBoard),
}

impl AnyBoard {
    /// Build the board of the requested kind for a team.
    pub fn build(kind: BoardKind, catalog: &SeedCatalog, team: &Team) -> Self {
        match kind {
            BoardKind::Kanban => AnyBoard::Kanban(catalog.kanban_board(team)),
            BoardKind::Scrum => AnyBoard::Scrum(catalog.scrum_board(team)),
        }
    }

    pub fn team(&self) -> &Team {
        match self {
            AnyBoard::Kanban(b) => b.team(),
            AnyBoard::Scrum(b) => b.team(),
        }
    }

    pub fn as_scrum_mut(&mut self) -> Option<&mut ScrumBoard> {
        match self {
            AnyBoard::Scrum(b) => Some(b),
            AnyBoard::Kanban(_) => None,
        }
    }

    pub fn as_scrum(&self) -> Option<&ScrumBoard> {
        match self {
            AnyBoard::Scrum(b) => Some(b),
            AnyBoard::Kanban(_) => None,
        }
    }

    /// Add a task the way the board's "new task" action does: into the named
    /// column on Kanban, into the active sprint's to-do column on Scrum.
    pub fn add_task(&mut self, task: Task, column_id: Option<&str>) -> Result<()> {
        match (self, column_id) {
            (AnyBoard::Kanban(b), Some(col)) => b.add_task(task, col),
            (AnyBoard::Kanban(b), None) => b.add_task(task, Phase::Todo.id()),
            (AnyBoard::Scrum(b), Some(col)) => b.add_task_to(task, col),
            (AnyBoard::Scrum(b), None) => b.add_task(task),
        }
    }

    fn ops(&self) -> &dyn BoardOps {
        match self {
            AnyBoard::Kanban(b) => b,
            AnyBoard::Scrum(b) => b,
        }
    }

    fn ops_mut(&mut self) -> &mut dyn BoardOps {
        match self {
            AnyBoard::Kanban(b) => b,
            AnyBoard::Scrum(b) => b,
        }
    }
}

impl BoardOps for AnyBoard {
    fn kind(&self) -> BoardKind {
        self.ops().kind()
    }

    fn columns(&self) -> &[Column] {
        self.ops().columns()
    }

    fn add_task_to(&mut self, task: Task, column_id: &str) -> Result<()> {
        self.ops_mut().add_task_to(task, column_id)
    }

    fn move_task(
        &mut self,
        task_id: &str,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<MoveOutcome> {
        self.ops_mut()
            .move_task(task_id, source_column, source_index, dest_column, dest_index)
    }

    fn edit_task(&mut self, updated: Task) -> bool {
        self.ops_mut().edit_task(updated)
    }

    fn delete_task(&mut self, task_id: &str, column_id: &str) -> Result<Option<Task>> {
        self.ops_mut().delete_task(task_id, column_id)
    }
}

/// One request against a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum BoardOp {
    Add {
        task: Task,
        #[serde(default)]
        column: Option<String>,
    },
    Move {
        task_id: String,
        source_column: String,
        source_index: usize,
        dest_column: String,
        dest_index: usize,
    },
    Edit {
        task: Task,
    },
    Delete {
        task_id: String,
        column: String,
        #[serde(default)]
        sprint: Option<String>,
    },
    Comment {
        task_id: String,
        text: String,
    },
    AddSprint,
    Activate {
        sprint: String,
    },
    Drop(DragResult),
}

/// Apply one operation, returning a short description of what happened.
pub fn apply(board: &mut AnyBoard, op: BoardOp) -> Result<String> {
    let applied = match op {
        BoardOp::Add { task, column } => {
            let id = task.id.clone();
            board.add_task(task, column.as_deref())?;
            format!("added {}", id)
        }
        BoardOp::Move {
            task_id,
            source_column,
            source_index,
            dest_column,
            dest_index,
        } => match board.move_task(&task_id, &source_column, source_index, &dest_column, dest_index)? {
            MoveOutcome::Moved => format!("moved {} to {}[{}]", task_id, dest_column, dest_index),
            MoveOutcome::Unchanged => format!("{} already at {}[{}]", task_id, dest_column, dest_index),
        },
        BoardOp::Edit { task } => {
            let id = task.id.clone();
            if board.edit_task(task) {
                format!("edited {}", id)
            } else {
                format!("no task {} to edit", id)
            }
        }
        BoardOp::Delete { task_id, column, sprint } => {
            let removed = match (board, sprint) {
                (AnyBoard::Scrum(scrum), Some(sprint)) => {
                    scrum.delete_task_in(&task_id, &column, &sprint)?
                }
                (AnyBoard::Kanban(_), Some(sprint)) => {
                    return Err(BoardError::sprint_not_found(sprint))
                }
                (board, None) => board.delete_task(&task_id, &column)?,
            };
            match removed {
                Some(_) => format!("deleted {}", task_id),
                None => format!("no task {} in {}", task_id, column),
            }
        }
        BoardOp::Comment { task_id, text } => {
            board.add_comment(&task_id, &text)?;
            format!("commented on {}", task_id)
        }
        BoardOp::AddSprint => match board.as_scrum_mut() {
            Some(scrum) => format!("added {}", scrum.add_sprint().id),
            None => "add-sprint ignored on a kanban board".to_string(),
        },
        BoardOp::Activate { sprint } => match board.as_scrum_mut() {
            Some(scrum) => format!("activated {}", scrum.set_active(&sprint)?.id),
            None => return Err(BoardError::sprint_not_found(sprint)),
        },
        BoardOp::Drop(drop) => match apply_drop(board, &drop)? {
            DropOutcome::Moved => format!("dropped {}", drop.task_id),
            DropOutcome::Unchanged => format!("{} dropped in place", drop.task_id),
            DropOutcome::Cancelled => format!("drag of {} cancelled", drop.task_id),
        },
    };
    Ok(applied)
}

/// Apply operations in order. Rejected operations are logged and reported
/// but do not stop the run.
pub fn apply_all(board: &mut AnyBoard, ops: Vec<BoardOp>) -> Vec<Result<String>> {
    ops.into_iter()
        .enumerate()
        .map(|(i, op)| {
            apply(board, op).inspect_err(|e| warn!(step = i + 1, error = %e, "operation rejected"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_board(kind: BoardKind) -> AnyBoard {
        let catalog = SeedCatalog::builtin();
        let ctx = catalog.team_context();
        AnyBoard::build(kind, &catalog, ctx.selected())
    }

    fn parse(json: &str) -> Vec<BoardOp> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_replay_continues_past_rejections() {
        let mut board = dev_board(BoardKind::Kanban);
        let ops = parse(
            r#"[
                {"op": "move", "task_id": "task-2-dev", "source_column": "todo", "source_index": 0,
                 "dest_column": "done", "dest_index": 0},
                {"op": "move", "task_id": "task-2-dev", "source_column": "todo", "source_index": 1,
                 "dest_column": "done", "dest_index": 0},
                {"op": "add", "task": {"id": "task-9", "title": "Ship it", "priority": "high"}},
                {"op": "delete", "task_id": "task-1-dev", "column": "todo"}
            ]"#,
        );
        let results = apply_all(&mut board, ops);
        assert!(matches!(results[0], Err(BoardError::TaskNotFound { .. })));
        assert_eq!(results[1].as_deref().unwrap(), "moved task-2-dev to done[0]");
        assert!(results[2].is_ok());
        assert!(results[3].is_ok());

        assert_eq!(board.columns()[0].task_ids(), vec!["task-9"]);
        assert_eq!(board.columns()[3].task_ids(), vec!["task-2-dev"]);
    }

    #[test]
    fn test_scrum_replay() {
        let mut board = dev_board(BoardKind::Scrum);
        let ops = parse(
            r#"[
                {"op": "activate", "sprint": "sprint-2"},
                {"op": "drop", "task_id": "task-6-sprint-2",
                 "source": {"column_id": "todo-sprint-2", "index": 1},
                 "destination": {"column_id": "todo-sprint-2", "index": 0}},
                {"op": "delete", "task_id": "task-1-sprint-1", "column": "todo-sprint-1", "sprint": "sprint-1"},
                {"op": "add-sprint"},
                {"op": "add", "task": {"id": "task-10", "title": "Spike", "points": 1}}
            ]"#,
        );
        let results = apply_all(&mut board, ops);
        assert!(results.iter().all(|r| r.is_ok()));

        let scrum = board.as_scrum().unwrap();
        assert_eq!(scrum.active().id, "sprint-3");
        assert_eq!(scrum.active().columns.column("todo-sprint-3").unwrap().task_ids(), vec!["task-10"]);
        let s2 = scrum.sprint("sprint-2").unwrap();
        assert_eq!(
            s2.columns.column("todo-sprint-2").unwrap().task_ids(),
            vec!["task-6-sprint-2", "task-5-sprint-2"]
        );
        assert_eq!(scrum.sprint("sprint-1").unwrap().columns.column("todo-sprint-1").unwrap().len(), 0);
    }

    #[test]
    fn test_sprint_scoped_delete_on_kanban_is_rejected() {
        let mut board = dev_board(BoardKind::Kanban);
        let ops = parse(
            r#"[{"op": "delete", "task_id": "task-1-dev", "column": "todo", "sprint": "sprint-1"}]"#,
        );
        let results = apply_all(&mut board, ops);
        assert!(matches!(results[0], Err(BoardError::SprintNotFound { .. })));
        assert_eq!(board.columns()[0].task_ids(), vec!["task-1-dev", "task-2-dev"]);
    }

    #[test]
    fn test_comment_op() {
        let mut board = dev_board(BoardKind::Kanban);
        let ops = parse(
            r#"[
                {"op": "comment", "task_id": "task-3-dev", "text": "Endpoint list is in the wiki"},
                {"op": "comment", "task_id": "task-3-dev", "text": "  "},
                {"op": "comment", "task_id": "missing", "text": "hello"}
            ]"#,
        );
        let results = apply_all(&mut board, ops);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(BoardError::EmptyComment { .. })));
        assert!(matches!(results[2], Err(BoardError::TaskNotFound { .. })));

        let task = &board.columns()[1].tasks[0];
        assert_eq!(task.comments, 4);
        assert_eq!(task.thread.len(), 1);
        assert_eq!(task.thread[0].author.initials, "AM");
    }

    #[test]
    fn test_activate_on_kanban_is_rejected() {
        let mut board = dev_board(BoardKind::Kanban);
        let r = apply(&mut board, BoardOp::Activate { sprint: "sprint-1".into() });
        assert!(matches!(r, Err(BoardError::SprintNotFound { .. })));
    }
}
