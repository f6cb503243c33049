//! Team product backlogs.
//!
//! Backlog items are not on any board: they carry both a priority label and a
//! story point estimate, and are listed per team.

use serde::{Deserialize, Serialize};

use crate::fields::Priority;
use crate::task::Assignee;

/// A product backlog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub points: u32,
    #[serde(default = "Assignee::unassigned")]
    pub assignee: Assignee,
}

/// Shown for teams that have no backlog of their own.
pub fn default_backlog() -> Vec<BacklogItem> {
    vec![BacklogItem {
        id: "PBI-default".to_string(),
        title: "Example item".to_string(),
        priority: Priority::Medium,
        points: 5,
        assignee: Assignee {
            initials: "US".to_string(),
            ..Assignee::named("User")
        },
    }]
}

/// Items matching an optional case-insensitive search over id and title, and
/// an optional priority. Order is preserved.
pub fn filter_backlog<'a>(
    items: &'a [BacklogItem],
    search: Option<&str>,
    priority: Option<Priority>,
) -> Vec<&'a BacklogItem> {
    let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    items
        .iter()
        .filter(|item| priority.map_or(true, |p| item.priority == p))
        .filter(|item| match &needle {
            Some(n) => item.title.to_lowercase().contains(n) || item.id.to_lowercase().contains(n),
            None => true,
        })
        .collect()
}

pub fn total_points(items: &[&BacklogItem]) -> u64 {
    items.iter().map(|i| u64::from(i.points)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, priority: Priority, points: u32) -> BacklogItem {
        BacklogItem {
            id: id.to_string(),
            title: title.to_string(),
            priority,
            points,
            assignee: Assignee::unassigned(),
        }
    }

    #[test]
    fn test_filter_backlog() {
        let items = vec![
            item("PBI-1", "User authentication", Priority::High, 8),
            item("PBI-2", "Optimise queries", Priority::High, 5),
            item("PBI-3", "REST API", Priority::Medium, 13),
        ];

        let high = filter_backlog(&items, None, Some(Priority::High));
        assert_eq!(high.len(), 2);
        assert_eq!(total_points(&high), 13);

        let found = filter_backlog(&items, Some("  api "), None);
        assert_eq!(found, vec![&items[2]]);

        let by_id = filter_backlog(&items, Some("pbi-2"), Some(Priority::Low));
        assert!(by_id.is_empty());

        assert_eq!(filter_backlog(&items, Some(""), None).len(), 3);
    }

    #[test]
    fn test_item_defaults() {
        let item: BacklogItem =
            serde_json::from_str(r#"{"id": "PBI-9", "title": "Audit", "priority": "Baja"}"#).unwrap();
        assert_eq!(item.priority, Priority::Low);
        assert_eq!(item.points, 0);
        assert_eq!(item.assignee, Assignee::unassigned());
        assert_eq!(default_backlog()[0].assignee.initials, "US");
    }
}
