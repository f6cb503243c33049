//! Board columns.

use serde::Serialize;

use crate::fields::Phase;
use crate::task::Task;

/// A named, ordered bucket of tasks for one workflow phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub phase: Phase,
    pub tasks: Vec<Task>,
}

impl Column {
    /// Create the empty column for `phase`. With a namespace the id becomes
    /// `<phase>-<namespace>`, e.g. `todo-sprint-2`.
    pub fn for_phase(phase: Phase, namespace: Option<&str>) -> Self {
        let id = match namespace {
            Some(ns) => format!("{}-{}", phase.id(), ns),
            None => phase.id().to_string(),
        };
        Column {
            id,
            title: phase.title().to_string(),
            phase,
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Index of the task with this id, if the column holds it.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }
}
