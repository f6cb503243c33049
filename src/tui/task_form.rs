//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used to author new tasks
//! and edit existing ones, including field ordering and the selectors for
//! assignee and priority.

use crate::{
    fields::{BoardKind, Priority},
    task::{Assignee, Estimate, Task},
    tui::input::InputField,
};

/// Global order constants for the form fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 1;
pub const ASSIGNEE_GLOBAL_ORDER: usize = 2;
/// Priority selector on Kanban boards, points field on Scrum boards.
pub const ESTIMATE_GLOBAL_ORDER: usize = 3;

/// Task form for creating and editing tasks
pub struct TaskForm {
    pub kind: BoardKind,
    pub title: InputField,
    pub description: InputField,
    pub points: InputField,
    pub assignee: usize,
    pub priority: usize,
    pub current_field: usize,
    pub assignees: Vec<Assignee>,
    pub priorities: Vec<Priority>,
    /// Task being edited; its id and counters are kept on save.
    pub editing: Option<Task>,
}

impl TaskForm {
    /// Create an empty form offering the given assignees.
    pub fn new(kind: BoardKind, assignees: Vec<Assignee>) -> Self {
        let assignees = if assignees.is_empty() {
            vec![Assignee::unassigned()]
        } else {
            assignees
        };
        // Default to the unassigned entry when offered, else the last one.
        let assignee = assignees
            .iter()
            .position(|a| *a == Assignee::unassigned())
            .unwrap_or(assignees.len() - 1);
        let mut form = Self {
            kind,
            title: InputField::new(),
            description: InputField::new(),
            points: InputField::with_value("3"),
            assignee,
            priority: 1, // Medium
            current_field: TITLE_GLOBAL_ORDER,
            assignees,
            priorities: Priority::ALL.to_vec(),
            editing: None,
        };
        form.update_active_field();
        form
    }

    /// Create a form populated from an existing task.
    pub fn from_task(kind: BoardKind, task: &Task, assignees: Vec<Assignee>) -> Self {
        let mut form = Self::new(kind, assignees);
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        match form.assignees.iter().position(|a| a.name == task.assignee.name) {
            Some(i) => form.assignee = i,
            None => {
                form.assignees.push(task.assignee.clone());
                form.assignee = form.assignees.len() - 1;
            }
        }
        match task.estimate {
            Estimate::Priority(p) => {
                form.priority = form.priorities.iter().position(|&x| x == p).unwrap_or(1);
            }
            Estimate::Points(n) => form.points = InputField::with_value(&n.to_string()),
        }
        form.editing = Some(task.clone());
        form.update_active_field();
        form
    }

    /// Get the total number of fields (input fields + selectors).
    pub fn field_count(&self) -> usize {
        4
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn text_field_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_GLOBAL_ORDER => Some(&mut self.title),
            DESCRIPTION_GLOBAL_ORDER => Some(&mut self.description),
            ESTIMATE_GLOBAL_ORDER if self.kind == BoardKind::Scrum => Some(&mut self.points),
            _ => None,
        }
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = false;
        self.description.active = false;
        self.points.active = false;
        if let Some(field) = self.text_field_mut() {
            field.active = true;
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        let points_field = self.current_field == ESTIMATE_GLOBAL_ORDER;
        if let Some(field) = self.text_field_mut() {
            if !points_field || c.is_ascii_digit() {
                field.handle_char(c);
            }
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.text_field_mut() {
            field.handle_backspace();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            ASSIGNEE_GLOBAL_ORDER => {
                self.assignee = cycle(self.assignee, self.assignees.len(), right);
            }
            ESTIMATE_GLOBAL_ORDER if self.kind == BoardKind::Kanban => {
                self.priority = cycle(self.priority, self.priorities.len(), right);
            }
            _ => {
                if let Some(field) = self.text_field_mut() {
                    if right {
                        field.move_cursor_right()
                    } else {
                        field.move_cursor_left()
                    }
                }
            }
        }
    }

    pub fn selected_assignee(&self) -> &Assignee {
        &self.assignees[self.assignee]
    }

    /// The estimate as entered. `None` when the points field does not hold
    /// a whole number that fits.
    pub fn estimate(&self) -> Option<Estimate> {
        match self.kind {
            BoardKind::Kanban => Some(Estimate::Priority(self.priorities[self.priority])),
            BoardKind::Scrum => self.points.value.trim().parse().ok().map(Estimate::Points),
        }
    }

    /// Build the task record, or the message to show when the form is not
    /// ready to save.
    ///
    /// When editing, the original id, counters and comments are kept;
    /// otherwise `new_id` becomes the identity.
    pub fn to_task(&self, new_id: &str) -> Result<Task, &'static str> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err("Title cannot be empty");
        }
        let estimate = self.estimate().ok_or("Points must be a whole number")?;
        let mut task = match &self.editing {
            Some(t) => t.clone(),
            None => Task::placeholder(new_id, self.kind),
        };
        task.title = title.to_string();
        task.description = self.description.value.trim().to_string();
        task.estimate = estimate;
        task.assignee = self.selected_assignee().clone();
        Ok(task)
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Assignee> {
        vec![Assignee::named("Ana M."), Assignee::unassigned()]
    }

    #[test]
    fn test_new_kanban_task() {
        let mut form = TaskForm::new(BoardKind::Kanban, people());
        assert_eq!(form.to_task("task-1"), Err("Title cannot be empty"));
        for c in "Fix login".chars() {
            form.handle_char(c);
        }
        form.next_field();
        form.next_field();
        form.handle_left_right(false);
        form.next_field();
        form.handle_left_right(true);

        let task = form.to_task("task-1").unwrap();
        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "Fix login");
        assert_eq!(task.assignee.name, "Ana M.");
        assert_eq!(task.estimate, Estimate::Priority(Priority::Low));
    }

    #[test]
    fn test_scrum_points_accept_digits_only() {
        let mut form = TaskForm::new(BoardKind::Scrum, people());
        form.handle_char('T');
        form.prev_field();
        assert_eq!(form.current_field, ESTIMATE_GLOBAL_ORDER);
        form.handle_backspace();
        form.handle_char('x');
        form.handle_char('8');
        assert_eq!(form.to_task("id").unwrap().estimate, Estimate::Points(8));
    }

    #[test]
    fn test_scrum_points_overflow_is_rejected() {
        let mut form = TaskForm::new(BoardKind::Scrum, people());
        form.handle_char('T');
        form.prev_field();
        form.handle_backspace();
        for c in "99999999999".chars() {
            form.handle_char(c);
        }
        assert_eq!(form.estimate(), None);
        assert_eq!(form.to_task("id"), Err("Points must be a whole number"));

        form.handle_backspace();
        while !form.points.value.is_empty() {
            form.handle_backspace();
        }
        assert!(form.to_task("id").is_err());
    }

    #[test]
    fn test_edit_keeps_identity_and_counters() {
        let mut original = Task::placeholder("task-7", BoardKind::Scrum);
        original.comments = 4;
        original.assignee = Assignee::named("Someone Else");
        original.add_comment("Blocked on review");
        let mut form = TaskForm::from_task(BoardKind::Scrum, &original, people());
        form.title = InputField::with_value("Renamed");

        let task = form.to_task("ignored").unwrap();
        assert_eq!(task.id, "task-7");
        assert_eq!(task.comments, 5);
        assert_eq!(task.thread.len(), 1);
        assert_eq!(task.assignee.name, "Someone Else");
        assert_eq!(task.estimate, Estimate::Points(3));
    }
}
