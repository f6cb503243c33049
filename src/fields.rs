//! Enumerations and field types for board management.
//!
//! This module defines the structured values used to classify tasks and to
//! lay out a board: priority labels, the four fixed workflow phases that every
//! board and sprint is partitioned into, and the board variant.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority label carried by Kanban tasks and backlog items.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "High", alias = "Alta")]
    High,
    #[default]
    #[serde(alias = "Medium", alias = "Media")]
    Medium,
    #[serde(alias = "Low", alias = "Baja")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

/// Workflow stage of a column. Every board and every sprint has exactly one
/// column per phase, in `Phase::ALL` order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Todo, Phase::InProgress, Phase::Review, Phase::Done];

    /// Stable column id for this phase on a Kanban board.
    pub fn id(self) -> &'static str {
        match self {
            Phase::Todo => "todo",
            Phase::InProgress => "in-progress",
            Phase::Review => "review",
            Phase::Done => "done",
        }
    }

    /// Column heading.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Todo => "To Do",
            Phase::InProgress => "In Progress",
            Phase::Review => "In Review",
            Phase::Done => "Done",
        }
    }

    /// Position of this phase in board order.
    pub fn index(self) -> usize {
        match self {
            Phase::Todo => 0,
            Phase::InProgress => 1,
            Phase::Review => 2,
            Phase::Done => 3,
        }
    }
}

/// Board variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Kanban,
    Scrum,
}

/// Format a priority label for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ids_are_stable() {
        let ids: Vec<&str> = Phase::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["todo", "in-progress", "review", "done"]);
        for (i, p) in Phase::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn test_priority_aliases() {
        let p: Priority = serde_json::from_str("\"Alta\"").unwrap();
        assert_eq!(p, Priority::High);
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
        let p: Priority = serde_json::from_str("\"Media\"").unwrap();
        assert_eq!(p, Priority::Medium);
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }
}
