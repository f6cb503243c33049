//! Task data structure and related functionality.
//!
//! This module defines the `Task` record that boards order and move around,
//! together with the denormalised assignee and the estimate that classifies it.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{BoardKind, Priority};

/// Avatar used when a task has nobody assigned.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder-user.jpg";

/// Person a task is assigned to. Copied into each task, not referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    pub initials: String,
}

fn default_avatar() -> String {
    PLACEHOLDER_AVATAR.to_string()
}

impl Assignee {
    /// Build an assignee, deriving initials from the name.
    pub fn named(name: &str) -> Self {
        let initials: String = name
            .split_whitespace()
            .filter_map(|w| w.chars().find(|c| c.is_alphabetic()))
            .flat_map(|c| c.to_uppercase())
            .take(2)
            .collect();
        Assignee {
            name: name.to_string(),
            avatar: default_avatar(),
            initials,
        }
    }

    pub fn unassigned() -> Self {
        Assignee {
            name: "Unassigned".to_string(),
            avatar: default_avatar(),
            initials: "NA".to_string(),
        }
    }
}

/// How a task is sized: a priority label on Kanban boards, story points on
/// Scrum boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estimate {
    Priority(Priority),
    Points(u32),
}

impl Estimate {
    /// Default estimate for a freshly created task on the given board.
    pub fn default_for(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Kanban => Estimate::Priority(Priority::Medium),
            BoardKind::Scrum => Estimate::Points(3),
        }
    }

    pub fn points(&self) -> Option<u32> {
        match self {
            Estimate::Points(p) => Some(*p),
            Estimate::Priority(_) => None,
        }
    }
}

/// One entry in a task's comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: Assignee,
    pub text: String,
    #[serde(default)]
    pub date: String,
}

/// A work item on a board.
///
/// The board never fabricates a task's content; it only decides which column
/// holds it and where. Identity is an opaque string, unique within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub estimate: Estimate,
    #[serde(default = "Assignee::unassigned")]
    pub assignee: Assignee,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub attachments: u32,
    /// Comments written on this board. `comments` also counts earlier ones
    /// that only exist as a number in the seed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thread: Vec<Comment>,
}

impl Task {
    /// Generate an identity for a newly authored task.
    pub fn new_id() -> String {
        format!("task-{}", Utc::now().timestamp_millis())
    }

    /// The quick-add task created from a column's "add" action.
    pub fn placeholder(id: impl Into<String>, kind: BoardKind) -> Self {
        Task {
            id: id.into(),
            title: "New task".to_string(),
            description: "Description of the new task".to_string(),
            estimate: Estimate::default_for(kind),
            assignee: Assignee::unassigned(),
            comments: 0,
            attachments: 0,
            thread: Vec::new(),
        }
    }

    /// Append a comment by the task's assignee and bump the counter.
    /// Blank text is ignored and returns `None`.
    pub fn add_comment(&mut self, text: &str) -> Option<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let now = Local::now();
        self.thread.push(Comment {
            id: format!("comment-{}-{}", now.timestamp_millis(), self.thread.len() + 1),
            author: self.assignee.clone(),
            text: text.to_string(),
            date: now.format("%b %-d %H:%M").to_string(),
        });
        self.comments += 1;
        self.thread.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_is_flattened_into_task() {
        let json = r#"{
            "id": "task-1",
            "title": "Design landing page",
            "description": "Mockups",
            "points": 5,
            "assignee": {"name": "Ana M.", "avatar": "/a.jpg", "initials": "AM"},
            "comments": 3,
            "attachments": 2
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.estimate, Estimate::Points(5));
        assert_eq!(task.assignee.initials, "AM");

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["points"], 5);
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn test_priority_task_with_defaults() {
        let json = r#"{"id": "t", "title": "Tidy", "priority": "Baja"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.estimate, Estimate::Priority(Priority::Low));
        assert_eq!(task.assignee, Assignee::unassigned());
        assert_eq!(task.comments, 0);
        assert!(task.description.is_empty());
    }

    #[test]
    fn test_placeholder_follows_board_kind() {
        let k = Task::placeholder("a", BoardKind::Kanban);
        assert_eq!(k.estimate, Estimate::Priority(Priority::Medium));
        let s = Task::placeholder("b", BoardKind::Scrum);
        assert_eq!(s.estimate.points(), Some(3));
        assert_eq!(s.title, "New task");
    }

    #[test]
    fn test_add_comment_grows_thread_and_counter() {
        let mut task = Task::placeholder("t", BoardKind::Kanban);
        task.comments = 2;
        task.assignee = Assignee::named("Ana M.");

        assert!(task.add_comment("   ").is_none());
        assert_eq!(task.comments, 2);

        let comment = task.add_comment(" Looks good ").unwrap().clone();
        assert_eq!(comment.text, "Looks good");
        assert_eq!(comment.author.initials, "AM");
        task.add_comment("Second").unwrap();
        assert_eq!(task.comments, 4);
        assert_ne!(task.thread[0].id, task.thread[1].id);

        // Empty threads stay out of the JSON.
        let plain = Task::placeholder("p", BoardKind::Kanban);
        assert!(serde_json::to_value(&plain).unwrap().get("thread").is_none());
    }

    #[test]
    fn test_initials_from_name() {
        assert_eq!(Assignee::named("Laura Sanchez").initials, "LS");
        assert_eq!(Assignee::named("juan d.").initials, "JD");
        assert!(Task::new_id().starts_with("task-"));
    }
}
