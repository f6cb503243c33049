//! Board state management.
//!
//! A board is a fixed partition of tasks into four ordered columns, one per
//! [`Phase`]. [`ColumnSet`] owns that partition and implements every
//! operation on it; [`KanbanBoard`] wraps one set for a team, and each Scrum
//! sprint (see `scrum.rs`) wraps another.
//!
//! Every operation validates its arguments before touching any column, so a
//! rejected request leaves the board exactly as it was.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::column::Column;
use crate::context::Team;
use crate::error::{BoardError, Result};
use crate::fields::{BoardKind, Phase};
use crate::task::Task;

/// Initial contents of a board: column id to ordered tasks.
pub type Seed = BTreeMap<String, Vec<Task>>;

/// Result of a move request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Source and destination were the same slot.
    Unchanged,
}

/// The four-column partition shared by Kanban boards and sprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Build the four columns, optionally namespaced, filling each from the
    /// seed. A column takes `seed[column.id]` if present, else
    /// `seed[phase.id()]`; columns with neither start empty.
    pub fn from_seed(seed: &Seed, namespace: Option<&str>) -> Self {
        let columns = Phase::ALL
            .iter()
            .map(|&phase| {
                let mut column = Column::for_phase(phase, namespace);
                if let Some(tasks) = seed.get(&column.id).or_else(|| seed.get(phase.id())) {
                    column.tasks = tasks.clone();
                }
                column
            })
            .collect();
        ColumnSet { columns }
    }

    pub fn empty(namespace: Option<&str>) -> Self {
        Self::from_seed(&Seed::new(), namespace)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_for_phase(&self, phase: Phase) -> &Column {
        &self.columns[phase.index()]
    }

    fn column_index(&self, id: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| BoardError::column_not_found(id))
    }

    /// Locate a task anywhere in the set: (column id, index, task).
    pub fn find_task(&self, task_id: &str) -> Option<(&str, usize, &Task)> {
        self.columns.iter().find_map(|c| {
            c.position_of(task_id)
                .map(|i| (c.id.as_str(), i, &c.tasks[i]))
        })
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.find_task(task_id).is_some()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum()
    }

    /// Append a task to the end of a column.
    pub fn add_task(&mut self, task: Task, column_id: &str) -> Result<()> {
        let col = self.column_index(column_id)?;
        if self.contains(&task.id) {
            return Err(BoardError::DuplicateTask { id: task.id });
        }
        debug!(task = %task.id, column = column_id, "adding task");
        self.columns[col].tasks.push(task);
        Ok(())
    }

    /// Relocate the task at `source_index` of `source_column` to `dest_index`
    /// of `dest_column`.
    ///
    /// The task is removed first and then inserted at `dest_index` of the
    /// resulting sequence, so for a move inside one column `dest_index` is
    /// read against the list without the moved task.
    pub fn move_task(
        &mut self,
        task_id: &str,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<MoveOutcome> {
        let src = self.column_index(source_column)?;
        let dst = self.column_index(dest_column)?;

        match self.columns[src].tasks.get(source_index) {
            Some(task) if task.id == task_id => {}
            _ => return Err(BoardError::task_not_found(task_id)),
        }

        if src == dst && source_index == dest_index {
            return Ok(MoveOutcome::Unchanged);
        }

        let dest_len = if src == dst {
            self.columns[dst].len() - 1
        } else {
            self.columns[dst].len()
        };
        if dest_index > dest_len {
            return Err(BoardError::InvalidPosition {
                column: dest_column.to_string(),
                index: dest_index,
                len: dest_len,
            });
        }

        let task = self.columns[src].tasks.remove(source_index);
        self.columns[dst].tasks.insert(dest_index, task);
        debug!(
            task = task_id,
            from = source_column,
            from_index = source_index,
            to = dest_column,
            to_index = dest_index,
            "moved task"
        );
        Ok(MoveOutcome::Moved)
    }

    /// Replace the record with the same id, keeping its column and position.
    /// Returns `false` when no such task exists.
    pub fn edit_task(&mut self, updated: Task) -> bool {
        for column in self.columns.iter_mut() {
            if let Some(slot) = column.tasks.iter_mut().find(|t| t.id == updated.id) {
                debug!(task = %updated.id, column = %column.id, "edited task");
                *slot = updated;
                return true;
            }
        }
        false
    }

    /// Remove a task from one column. `Ok(None)` if the column does not hold it.
    pub fn delete_task(&mut self, task_id: &str, column_id: &str) -> Result<Option<Task>> {
        let col = self.column_index(column_id)?;
        let removed = self.columns[col]
            .position_of(task_id)
            .map(|i| self.columns[col].tasks.remove(i));
        if removed.is_some() {
            debug!(task = task_id, column = column_id, "deleted task");
        }
        Ok(removed)
    }
}

/// Operations a gesture layer or view can drive on any board variant.
///
/// On a Scrum board every method is scoped to the active sprint.
pub trait BoardOps {
    fn kind(&self) -> BoardKind;

    fn columns(&self) -> &[Column];

    /// Append a task to the named column.
    fn add_task_to(&mut self, task: Task, column_id: &str) -> Result<()>;

    fn move_task(
        &mut self,
        task_id: &str,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<MoveOutcome>;

    fn edit_task(&mut self, updated: Task) -> bool;

    fn delete_task(&mut self, task_id: &str, column_id: &str) -> Result<Option<Task>>;

    /// Whether a task with this id is present.
    fn contains(&self, task_id: &str) -> bool {
        self.columns().iter().any(|c| c.position_of(task_id).is_some())
    }

    /// Append a comment to a task's thread, in place.
    fn add_comment(&mut self, task_id: &str, text: &str) -> Result<()> {
        let mut task = self
            .columns()
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| BoardError::task_not_found(task_id))?;
        if task.add_comment(text).is_none() {
            return Err(BoardError::EmptyComment { id: task_id.to_string() });
        }
        self.edit_task(task);
        Ok(())
    }
}

/// A team's Kanban board.
#[derive(Debug, Clone)]
pub struct KanbanBoard {
    team: Team,
    columns: ColumnSet,
}

impl KanbanBoard {
    pub fn new(team: Team, seed: &Seed) -> Self {
        KanbanBoard {
            team,
            columns: ColumnSet::from_seed(seed, None),
        }
    }

    /// Replace the whole board with a new seed.
    pub fn initialize(&mut self, seed: &Seed) {
        self.columns = ColumnSet::from_seed(seed, None);
        debug!(team = %self.team.value, tasks = self.columns.task_count(), "initialized kanban board");
    }

    /// Switch to another team and its seed.
    pub fn reset(&mut self, team: Team, seed: &Seed) {
        self.team = team;
        self.initialize(seed);
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn column_set(&self) -> &ColumnSet {
        &self.columns
    }

    /// Append a task to the end of a column.
    pub fn add_task(&mut self, task: Task, column_id: &str) -> Result<()> {
        self.columns.add_task(task, column_id).inspect_err(|e| {
            warn!(error = %e, "add rejected");
        })
    }
}

impl BoardOps for KanbanBoard {
    fn kind(&self) -> BoardKind {
        BoardKind::Kanban
    }

    fn columns(&self) -> &[Column] {
        self.columns.columns()
    }

    fn add_task_to(&mut self, task: Task, column_id: &str) -> Result<()> {
        self.add_task(task, column_id)
    }

    fn move_task(
        &mut self,
        task_id: &str,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<MoveOutcome> {
        self.columns
            .move_task(task_id, source_column, source_index, dest_column, dest_index)
    }

    fn edit_task(&mut self, updated: Task) -> bool {
        self.columns.edit_task(updated)
    }

    fn delete_task(&mut self, task_id: &str, column_id: &str) -> Result<Option<Task>> {
        self.columns.delete_task(task_id, column_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::task::{Assignee, Estimate};

    pub(crate) fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            estimate: Estimate::Priority(Priority::Medium),
            assignee: Assignee::unassigned(),
            comments: 0,
            attachments: 0,
            thread: Vec::new(),
        }
    }

    pub(crate) fn seed(entries: &[(&str, &[&str])]) -> Seed {
        entries
            .iter()
            .map(|(col, ids)| (col.to_string(), ids.iter().map(|id| task(id)).collect()))
            .collect()
    }

    fn ids(set: &ColumnSet, column: &str) -> Vec<String> {
        set.column(column)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    fn all_ids(set: &ColumnSet) -> Vec<String> {
        let mut v: Vec<String> = set
            .iter()
            .flat_map(|c| c.tasks.iter().map(|t| t.id.clone()))
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_seed_fills_known_columns_and_leaves_rest_empty() {
        let set = ColumnSet::from_seed(&seed(&[("todo", &["a", "b"]), ("bogus", &["z"])]), None);
        let col_ids: Vec<&str> = set.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(col_ids, vec!["todo", "in-progress", "review", "done"]);
        assert_eq!(ids(&set, "todo"), vec!["a", "b"]);
        assert!(set.column("done").unwrap().is_empty());
        assert!(!set.contains("z"));
    }

    #[test]
    fn test_namespaced_seed_prefers_exact_key() {
        let s = seed(&[("todo-sprint-2", &["exact"]), ("todo", &["fallback"]), ("review", &["r"])]);
        let set = ColumnSet::from_seed(&s, Some("sprint-2"));
        assert_eq!(ids(&set, "todo-sprint-2"), vec!["exact"]);
        assert_eq!(ids(&set, "review-sprint-2"), vec!["r"]);
        assert!(set.column("todo").is_none());
    }

    #[test]
    fn test_move_within_column_removes_before_inserting() {
        let mut set = ColumnSet::from_seed(&seed(&[("todo", &["t0", "t1", "t2"])]), None);
        let outcome = set.move_task("t2", "todo", 2, "todo", 0).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(ids(&set, "todo"), vec!["t2", "t0", "t1"]);

        set.move_task("t2", "todo", 0, "todo", 1).unwrap();
        assert_eq!(ids(&set, "todo"), vec!["t0", "t2", "t1"]);

        set.move_task("t0", "todo", 0, "todo", 2).unwrap();
        assert_eq!(ids(&set, "todo"), vec!["t2", "t1", "t0"]);
    }

    #[test]
    fn test_move_across_columns() {
        let mut set = ColumnSet::from_seed(&seed(&[("todo", &["t0", "t1"]), ("review", &["t2"])]), None);
        set.move_task("t1", "todo", 1, "review", 0).unwrap();
        assert_eq!(ids(&set, "todo"), vec!["t0"]);
        assert_eq!(ids(&set, "review"), vec!["t1", "t2"]);

        set.move_task("t0", "todo", 0, "review", 2).unwrap();
        assert!(set.column("todo").unwrap().is_empty());
        assert_eq!(ids(&set, "review"), vec!["t1", "t2", "t0"]);
    }

    #[test]
    fn test_self_move_is_a_no_op() {
        let mut set = ColumnSet::from_seed(&seed(&[("todo", &["a", "b"]), ("done", &["c"])]), None);
        let before = set.clone();
        assert_eq!(set.move_task("b", "todo", 1, "todo", 1).unwrap(), MoveOutcome::Unchanged);
        assert_eq!(set, before);
    }

    #[test]
    fn test_rejected_moves_leave_board_untouched() {
        let mut set = ColumnSet::from_seed(&seed(&[("todo", &["a", "b"]), ("done", &["c"])]), None);
        let before = set.clone();

        assert!(matches!(
            set.move_task("a", "nope", 0, "done", 0),
            Err(BoardError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            set.move_task("a", "todo", 0, "nope", 0),
            Err(BoardError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            set.move_task("b", "todo", 0, "done", 0),
            Err(BoardError::TaskNotFound { .. })
        ));
        assert!(matches!(
            set.move_task("a", "todo", 7, "done", 0),
            Err(BoardError::TaskNotFound { .. })
        ));
        assert!(matches!(
            set.move_task("a", "todo", 0, "done", 2),
            Err(BoardError::InvalidPosition { len: 1, .. })
        ));
        assert!(matches!(
            set.move_task("a", "todo", 0, "todo", 2),
            Err(BoardError::InvalidPosition { len: 1, .. })
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_moves_preserve_relative_order_of_others() {
        let mut set = ColumnSet::from_seed(
            &seed(&[("todo", &["a", "b", "c", "d"]), ("in-progress", &["e", "f", "g"])]),
            None,
        );
        set.move_task("b", "todo", 1, "in-progress", 2).unwrap();
        assert_eq!(ids(&set, "todo"), vec!["a", "c", "d"]);
        assert_eq!(ids(&set, "in-progress"), vec!["e", "f", "b", "g"]);
        assert!(set.column("review").unwrap().is_empty());
    }

    #[test]
    fn test_partition_holds_over_operation_sequence() {
        let mut set = ColumnSet::from_seed(
            &seed(&[("todo", &["a", "b", "c"]), ("review", &["d"]), ("done", &["e"])]),
            None,
        );
        let expected = all_ids(&set);
        let columns = ["todo", "in-progress", "review", "done"];

        // Walk every task through a deterministic shuffle of moves.
        for step in 0..40usize {
            let src = columns[step % 4];
            let len = set.column(src).unwrap().len();
            if len == 0 {
                continue;
            }
            let src_index = (step * 7) % len;
            let task_id = set.column(src).unwrap().tasks[src_index].id.clone();
            let dst = columns[(step * 3 + 1) % 4];
            let dst_len = set.column(dst).unwrap().len() - usize::from(src == dst);
            let dst_index = (step * 5) % (dst_len + 1);
            set.move_task(&task_id, src, src_index, dst, dst_index).unwrap();

            assert_eq!(all_ids(&set), expected);
            assert_eq!(set.task_count(), expected.len());
        }
    }

    #[test]
    fn test_add_then_edit_keeps_position() {
        let mut board = KanbanBoard::new(Team::new("Dev", "dev"), &seed(&[("todo", &["a"])]));
        board.add_task(task("n"), "todo").unwrap();

        let mut edited = task("n");
        edited.title = "X".to_string();
        assert!(board.edit_task(edited));

        let todo = board.column_set().column("todo").unwrap();
        assert_eq!(todo.position_of("n"), Some(1));
        assert_eq!(todo.tasks[1].title, "X");
    }

    #[test]
    fn test_add_rejects_unknown_column_and_duplicates() {
        let mut board = KanbanBoard::new(Team::new("Dev", "dev"), &seed(&[("done", &["a"])]));
        assert!(matches!(
            board.add_task(task("n"), "backlog"),
            Err(BoardError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            board.add_task(task("a"), "todo"),
            Err(BoardError::DuplicateTask { .. })
        ));
        assert_eq!(board.column_set().task_count(), 1);
    }

    #[test]
    fn test_edit_unknown_task_is_silent() {
        let mut board = KanbanBoard::new(Team::new("Dev", "dev"), &seed(&[("todo", &["a"])]));
        let before = board.column_set().clone();
        assert!(!board.edit_task(task("ghost")));
        assert_eq!(board.column_set(), &before);
    }

    #[test]
    fn test_delete_is_scoped_to_column() {
        let mut board = KanbanBoard::new(
            Team::new("Dev", "dev"),
            &seed(&[("todo", &["a", "b"]), ("done", &["c"])]),
        );
        let before = board.column_set().clone();

        assert!(board.delete_task("unknown", "todo").unwrap().is_none());
        assert!(board.delete_task("c", "todo").unwrap().is_none());
        assert!(matches!(
            board.delete_task("a", "archive"),
            Err(BoardError::ColumnNotFound { .. })
        ));
        assert_eq!(board.column_set(), &before);

        let removed = board.delete_task("a", "todo").unwrap().unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(ids(board.column_set(), "todo"), vec!["b"]);
    }

    #[test]
    fn test_initialize_replaces_everything() {
        let mut board = KanbanBoard::new(Team::new("Dev", "dev"), &seed(&[("todo", &["a"])]));
        board.add_task(task("b"), "review").unwrap();
        board.reset(Team::new("Design", "design"), &seed(&[("done", &["z"])]));
        assert_eq!(board.team().value, "design");
        assert!(!board.contains("a"));
        assert!(!board.contains("b"));
        assert_eq!(ids(board.column_set(), "done"), vec!["z"]);
    }
}
