//! Plain-text rendering of boards for the CLI.

use crate::backlog::{total_points, BacklogItem};
use crate::column::Column;
use crate::fields::format_priority;
use crate::scrum::Sprint;
use crate::task::{Estimate, Task};

/// Format an estimate for display ("High", "5 pts").
pub fn format_estimate(e: Estimate) -> String {
    match e {
        Estimate::Priority(p) => format_priority(p).to_string(),
        Estimate::Points(1) => "1 pt".to_string(),
        Estimate::Points(n) => format!("{} pts", n),
    }
}

/// Comment and attachment badges ("3c 2a"), omitted when both are zero.
pub fn format_badges(t: &Task) -> String {
    if t.comments == 0 && t.attachments == 0 {
        String::new()
    } else {
        format!("{}c {}a", t.comments, t.attachments)
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print each column with its tasks in order.
pub fn print_board(columns: &[Column]) {
    for column in columns {
        println!("{} [{}] ({})", column.title, column.id, column.len());
        if column.is_empty() {
            println!("  -");
        }
        for (i, t) in column.tasks.iter().enumerate() {
            println!(
                "  {:<3} {:<20} {:<32} {:<8} {:<3} {}",
                i,
                truncate(&t.id, 20),
                truncate(&t.title, 32),
                format_estimate(t.estimate),
                t.assignee.initials,
                format_badges(t)
            );
        }
        println!();
    }
}

/// Print a sprint's heading line.
pub fn print_sprint_header(sprint: &Sprint, active: bool) {
    let marker = if active { "*" } else { " " };
    let range = if sprint.start.is_empty() && sprint.end.is_empty() {
        "-".to_string()
    } else {
        format!("{} - {}", sprint.start, sprint.end)
    };
    println!(
        "{} {:<10} {:<12} {:<18} {:>3}%",
        marker, sprint.id, sprint.name, range, sprint.progress
    );
}

/// Count tasks and sum points per column. Totals are `u64` so no seed can
/// overflow them.
pub fn column_summary(columns: &[Column]) -> Vec<(String, usize, u64)> {
    columns
        .iter()
        .map(|c| {
            let points = c
                .tasks
                .iter()
                .filter_map(|t| t.estimate.points())
                .map(u64::from)
                .sum();
            (c.title.clone(), c.len(), points)
        })
        .collect()
}

/// Print the per-column task distribution.
pub fn print_summary(columns: &[Column]) {
    println!("{:<14} {:>6} {:>7}", "Column", "Tasks", "Points");
    let rows = column_summary(columns);
    for (title, count, points) in &rows {
        println!("{:<14} {:>6} {:>7}", title, count, points);
    }
    let total: usize = rows.iter().map(|r| r.1).sum();
    let total_points: u64 = rows.iter().map(|r| r.2).sum();
    println!("{:<14} {:>6} {:>7}", "Total", total, total_points);
}

/// Print backlog items with their priority and estimate.
pub fn print_backlog(items: &[&BacklogItem]) {
    if items.is_empty() {
        println!("No backlog items.");
        return;
    }
    println!("{:<14} {:<36} {:<8} {:>6}  {}", "ID", "Title", "Priority", "Points", "Assignee");
    for item in items {
        println!(
            "{:<14} {:<36} {:<8} {:>6}  {}",
            truncate(&item.id, 14),
            truncate(&item.title, 36),
            format_priority(item.priority),
            item.points,
            item.assignee.name
        );
    }
    println!("{} items, {} points", items.len(), total_points(items));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ColumnSet, Seed};
    use crate::fields::BoardKind;
    use crate::fields::Priority;
    use crate::seed::SeedCatalog;

    #[test]
    fn test_format_estimate() {
        assert_eq!(format_estimate(Estimate::Priority(Priority::High)), "High");
        assert_eq!(format_estimate(Estimate::Points(1)), "1 pt");
        assert_eq!(format_estimate(Estimate::Points(13)), "13 pts");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }

    #[test]
    fn test_summary_counts_points() {
        let catalog = SeedCatalog::builtin();
        let ctx = catalog.team_context();
        let scrum = catalog.scrum_board(ctx.selected());
        let rows = column_summary(scrum.active().columns.columns());
        assert_eq!(rows[0], ("To Do".to_string(), 1, 5));
        assert_eq!(rows[1].2, 8);

        let empty = column_summary(ColumnSet::empty(None).columns());
        assert!(empty.iter().all(|r| r.1 == 0 && r.2 == 0));
    }

    #[test]
    fn test_summary_points_do_not_overflow() {
        let mut big = Seed::new();
        big.insert(
            "todo".to_string(),
            ["a", "b"]
                .iter()
                .map(|id| Task {
                    estimate: Estimate::Points(3_000_000_000),
                    ..Task::placeholder(*id, BoardKind::Scrum)
                })
                .collect(),
        );
        let set = ColumnSet::from_seed(&big, None);
        let rows = column_summary(set.columns());
        assert_eq!(rows[0].2, 6_000_000_000);
    }
}
