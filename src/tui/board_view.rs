//! Kanban/Scrum board interface.
//!
//! This module implements the interactive board: four phase columns of task
//! cards, moved around with the keyboard. Every card move is reported to the
//! board as a finished drag (`DragResult`), so the view never edits column
//! contents itself.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::info;

use crate::board::BoardOps;
use crate::context::TeamContext;
use crate::display::{format_badges, format_estimate, truncate};
use crate::drag::{apply_drop, DragResult, DropLocation, DropOutcome};
use crate::fields::{format_priority, BoardKind, Phase};
use crate::ops::AnyBoard;
use crate::seed::SeedCatalog;
use crate::task::Task;
use crate::tui::colors::{phase_color, text_on, DARK_RED};
use crate::tui::enums::{AppState, PendingDelete};
use crate::tui::input::InputField;
use crate::tui::task_form::{
    TaskForm, ASSIGNEE_GLOBAL_ORDER, DESCRIPTION_GLOBAL_ORDER, ESTIMATE_GLOBAL_ORDER,
    TITLE_GLOBAL_ORDER,
};

const COLUMN_COUNT: usize = 4;
const CARD_HEIGHT: usize = 5;

/// Main board application state
pub struct BoardApp {
    catalog: SeedCatalog,
    teams: TeamContext,
    board: AnyBoard,
    state: AppState,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; COLUMN_COUNT],
    status_message: String,
    form: Option<TaskForm>,
    pending_delete: Option<PendingDelete>,
    comment_input: InputField,
}

impl BoardApp {
    /// Create a board view for the selected team.
    pub fn new(catalog: SeedCatalog, teams: TeamContext, kind: BoardKind) -> Self {
        let board = AnyBoard::build(kind, &catalog, teams.selected());
        BoardApp {
            catalog,
            teams,
            board,
            state: AppState::Board,
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; COLUMN_COUNT],
            status_message: String::new(),
            form: None,
            pending_delete: None,
            comment_input: InputField::new(),
        }
    }

    pub fn board(&self) -> &AnyBoard {
        &self.board
    }

    fn kind(&self) -> BoardKind {
        self.board.kind()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn column_len(&self, column: usize) -> usize {
        self.board.columns()[column].len()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.board.columns()[self.selected_column]
            .tasks
            .get(self.selected_card)
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= COLUMN_COUNT {
            self.selected_column = 0;
        }
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    fn reset_selection(&mut self) {
        self.selected_column = 0;
        self.selected_card = 0;
        self.column_scroll_offsets = [0; COLUMN_COUNT];
    }

    /// An id no task on the current board uses yet.
    fn fresh_id(&self) -> String {
        let base = Task::new_id();
        let mut id = base.clone();
        let mut n = 1;
        while self.board.contains(&id) {
            n += 1;
            id = format!("{}-{}", base, n);
        }
        id
    }

    /// Report a finished gesture to the board and follow the card.
    fn drop_selected(&mut self, dest_column: usize, dest_index: usize) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let columns = self.board.columns();
        let drag = DragResult {
            task_id: task.id.clone(),
            source: DropLocation::new(columns[self.selected_column].id.clone(), self.selected_card),
            destination: Some(DropLocation::new(columns[dest_column].id.clone(), dest_index)),
        };

        match apply_drop(&mut self.board, &drag) {
            Ok(DropOutcome::Moved) => {
                let title = self.board.columns()[dest_column].title.clone();
                self.selected_column = dest_column;
                self.selected_card = dest_index;
                self.set_status_message(format!("Moved task to {}", title));
            }
            Ok(_) => {}
            Err(e) => self.set_status_message(format!("Move rejected: {}", e)),
        }
    }

    /// Move the selected card to the neighbouring column, keeping its row
    /// where the destination allows.
    fn move_card_horizontal(&mut self, right: bool) {
        let target = match (right, self.selected_column) {
            (false, 0) => return,
            (false, c) => c - 1,
            (true, c) if c + 1 >= COLUMN_COUNT => return,
            (true, c) => c + 1,
        };
        let index = self.selected_card.min(self.column_len(target));
        self.drop_selected(target, index);
    }

    /// Move the selected card one slot up or down within its column.
    fn move_card_vertical(&mut self, down: bool) {
        let len = self.column_len(self.selected_column);
        let target = if down {
            if self.selected_card + 1 >= len {
                return;
            }
            self.selected_card + 1
        } else {
            if self.selected_card == 0 {
                return;
            }
            self.selected_card - 1
        };
        self.drop_selected(self.selected_column, target);
    }

    /// Append a placeholder task to the selected column.
    fn quick_add(&mut self) {
        let task = Task::placeholder(self.fresh_id(), self.kind());
        let column_id = self.board.columns()[self.selected_column].id.clone();
        match self.board.add_task_to(task, &column_id) {
            Ok(()) => {
                self.selected_card = self.column_len(self.selected_column) - 1;
                self.set_status_message("Added new task".to_string());
            }
            Err(e) => self.set_status_message(format!("Could not add task: {}", e)),
        }
    }

    fn open_add_form(&mut self) {
        self.form = Some(TaskForm::new(self.kind(), self.board.team().assignable()));
        self.state = AppState::AddTask;
    }

    fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        self.form = Some(TaskForm::from_task(self.kind(), &task, self.board.team().assignable()));
        self.state = AppState::EditTask;
    }

    /// Save the form: edits replace the task in place, new tasks go to the
    /// board's to-do column.
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let task = match form.to_task(&self.fresh_id()) {
            Ok(task) => task,
            Err(msg) => {
                self.set_status_message(msg.to_string());
                return;
            }
        };

        if form.editing.is_some() {
            if self.board.edit_task(task) {
                self.set_status_message("Task updated".to_string());
            } else {
                self.set_status_message("Task no longer on this board".to_string());
            }
        } else {
            let title = task.title.clone();
            match self.board.add_task(task, None) {
                Ok(()) => {
                    self.selected_column = Phase::Todo.index();
                    self.selected_card = self.column_len(self.selected_column).saturating_sub(1);
                    self.set_status_message(format!("Created '{}'", title));
                }
                Err(e) => self.set_status_message(format!("Could not add task: {}", e)),
            }
        }
        self.form = None;
        self.state = AppState::Board;
    }

    fn open_comment(&mut self) {
        self.comment_input = InputField::new();
        self.comment_input.active = true;
        self.state = AppState::Comment;
    }

    /// Add the typed comment to the selected task and return to its details.
    fn submit_comment(&mut self) {
        let Some(task_id) = self.selected_task().map(|t| t.id.clone()) else {
            self.state = AppState::Board;
            return;
        };
        match self.board.add_comment(&task_id, &self.comment_input.value) {
            Ok(()) => {
                self.set_status_message("Comment added".to_string());
                self.state = AppState::TaskDetail;
            }
            Err(e) => self.set_status_message(format!("Could not add comment: {}", e)),
        }
    }

    fn handle_comment_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.state = AppState::TaskDetail,
            KeyCode::Enter => self.submit_comment(),
            KeyCode::Backspace => self.comment_input.handle_backspace(),
            KeyCode::Delete => self.comment_input.handle_delete(),
            KeyCode::Left => self.comment_input.move_cursor_left(),
            KeyCode::Right => self.comment_input.move_cursor_right(),
            KeyCode::Char(c) => self.comment_input.handle_char(c),
            _ => {}
        }
    }

    fn prepare_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.pending_delete = Some(PendingDelete {
            task_id: task.id.clone(),
            title: task.title.clone(),
            column_id: self.board.columns()[self.selected_column].id.clone(),
            sprint_id: self.board.as_scrum().map(|s| s.active().id.clone()),
        });
        self.state = AppState::Confirm;
    }

    fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        let result = match (&mut self.board, pending.sprint_id.as_deref()) {
            (AnyBoard::Scrum(scrum), Some(sprint)) => {
                scrum.delete_task_in(&pending.task_id, &pending.column_id, sprint)
            }
            (board, _) => board.delete_task(&pending.task_id, &pending.column_id),
        };
        match result {
            Ok(Some(_)) => self.set_status_message(format!("Deleted '{}'", pending.title)),
            Ok(None) => self.set_status_message("Task was already gone".to_string()),
            Err(e) => self.set_status_message(format!("Error deleting task: {}", e)),
        }
        self.clamp_selection();
    }

    /// Select the next team and rebuild the board from its seed.
    fn switch_team(&mut self) {
        let team = self.teams.cycle().clone();
        self.board = AnyBoard::build(self.kind(), &self.catalog, &team);
        info!(team = %team.value, "switched team");
        self.reset_selection();
        self.set_status_message(format!("Switched to {}", team.label));
    }

    fn next_sprint(&mut self) {
        if let Some(scrum) = self.board.as_scrum_mut() {
            let name = scrum.cycle_active().name.clone();
            self.reset_selection();
            self.set_status_message(format!("Viewing {}", name));
        }
    }

    fn add_sprint(&mut self) {
        if let Some(scrum) = self.board.as_scrum_mut() {
            let name = scrum.add_sprint().name.clone();
            self.reset_selection();
            self.set_status_message(format!("Created {}", name));
        } else {
            self.set_status_message("Sprints are only available on Scrum boards".to_string());
        }
    }

    /// Handle keyboard input. Returns true when the app should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }

        match self.state {
            AppState::Board => return Ok(self.handle_board_key(key.code, key.modifiers)),
            AppState::AddTask | AppState::EditTask => self.handle_form_key(key.code),
            AppState::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.confirm_delete();
                    self.state = AppState::Board;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.pending_delete = None;
                    self.state = AppState::Board;
                }
                _ => {}
            },
            AppState::Comment => self.handle_comment_key(key.code),
            AppState::TaskDetail if key.code == KeyCode::Char('c') => self.open_comment(),
            AppState::TaskDetail | AppState::Help => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h')) {
                    self.state = AppState::Board;
                }
            }
        }
        Ok(false)
    }

    fn handle_board_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.clear_status_message();
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,

            // Card movement (check first, before regular navigation)
            KeyCode::Left if ctrl => self.move_card_horizontal(false),
            KeyCode::Right if ctrl => self.move_card_horizontal(true),
            KeyCode::Up if ctrl => self.move_card_vertical(false),
            KeyCode::Down if ctrl => self.move_card_vertical(true),

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLUMN_COUNT {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_card + 1 < self.column_len(self.selected_column) {
                    self.selected_card += 1;
                }
            }

            KeyCode::Enter => {
                if self.selected_task().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('n') => self.open_add_form(),
            KeyCode::Char('a') => self.quick_add(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('x') | KeyCode::Delete => self.prepare_delete(),
            KeyCode::Char('t') => self.switch_team(),
            KeyCode::Tab => self.next_sprint(),
            KeyCode::Char('s') => self.add_sprint(),
            KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Some(form) = self.form.as_mut() else {
            self.state = AppState::Board;
            return;
        };
        match code {
            KeyCode::Esc => {
                self.form = None;
                self.state = AppState::Board;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    /// Render the board and any overlay
    fn render(&mut self, f: &mut Frame) {
        let tabs_height = if self.board.as_scrum().is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Header
                Constraint::Length(tabs_height), // Sprint tabs
                Constraint::Min(0),              // Board
                Constraint::Length(1),           // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        if tabs_height > 0 {
            self.render_sprint_tabs(f, chunks[1]);
        }
        self.render_board(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        match self.state {
            AppState::TaskDetail | AppState::Comment => self.render_task_detail_popup(f),
            AppState::AddTask | AppState::EditTask => self.render_form(f),
            AppState::Confirm => self.render_confirm(f),
            AppState::Help => self.render_help(f),
            AppState::Board => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mode = match self.kind() {
            BoardKind::Kanban => "KANBAN BOARD",
            BoardKind::Scrum => "SCRUM BOARD",
        };
        let header_text = vec![Line::from(vec![
            Span::styled(mode, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Team: {}", self.board.team().label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_sprint_tabs(&self, f: &mut Frame, area: Rect) {
        let Some(scrum) = self.board.as_scrum() else {
            return;
        };
        let titles: Vec<String> = scrum
            .sprints()
            .iter()
            .map(|s| format!("{} ({}%)", s.name, s.progress))
            .collect();
        let active = scrum
            .sprints()
            .iter()
            .position(|s| s.id == scrum.active().id)
            .unwrap_or(0);
        let sprint = scrum.active();
        let range = if sprint.start.is_empty() {
            String::new()
        } else {
            format!(" {} - {} ", sprint.start, sprint.end)
        };

        let tabs = Tabs::new(titles)
            .select(active)
            .block(Block::default().borders(Borders::ALL).title(range))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = (0..COLUMN_COUNT)
            .map(|_| Constraint::Percentage(100 / COLUMN_COUNT as u16))
            .collect();
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let is_selected = column_index == self.selected_column;
        let column = &self.board.columns()[column_index];
        let color = phase_color(column.phase);

        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", column.title, column.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if column.is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);

        // Keep the selected card in view
        let mut scroll_offset = self.column_scroll_offsets[column_index];
        if is_selected {
            if self.selected_card < scroll_offset {
                scroll_offset = self.selected_card;
            } else if self.selected_card >= scroll_offset + visible_cards {
                scroll_offset = self.selected_card + 1 - visible_cards;
            }
        }
        scroll_offset = scroll_offset.min(column.len().saturating_sub(1));

        let mut current_y = 0;
        let mut rendered_cards = 0;
        for (card_index, task) in column.tasks.iter().enumerate().skip(scroll_offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            let highlighted = is_selected && card_index == self.selected_card;
            render_card(f, card_area, task, color, highlighted);
            current_y += CARD_HEIGHT;
            rendered_cards += 1;
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = column.len() - scroll_offset - rendered_cards;
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }

        self.column_scroll_offsets[column_index] = scroll_offset;
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let total: usize = self.board.columns().iter().map(|c| c.len()).sum();
            let sprint_keys = if self.board.as_scrum().is_some() { " | Tab: Sprint | s: New sprint" } else { "" };
            format!(
                "Tasks: {} | Ctrl+Arrows: Move | n: New | a: Quick add | e: Edit | x: Delete | t: Team{} | h: Help",
                total, sprint_keys
            )
        };
        let color = phase_color(self.board.columns()[self.selected_column].phase);
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(color).fg(text_on(color)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let column = &self.board.columns()[self.selected_column];
        let popup_area = centered_rect(70, 60, f.area());
        f.render_widget(Clear, popup_area);

        let mut detail_lines = vec![
            Line::from(vec![Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("ID:           {}", task.id)),
            Line::from(format!("Column:       {}", column.title)),
            Line::from(format!("Estimate:     {}", format_estimate(task.estimate))),
            Line::from(format!("Assignee:     {} ({})", task.assignee.name, task.assignee.initials)),
            Line::from(format!("Comments:     {}", task.comments)),
            Line::from(format!("Attachments:  {}", task.attachments)),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-".to_string() } else { task.description.clone() }),
        ];

        if !task.thread.is_empty() {
            detail_lines.push(Line::from(""));
            detail_lines.push(Line::from("Thread:"));
            for comment in &task.thread {
                detail_lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ({}) ", comment.author.name, comment.date),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(comment.text.clone()),
                ]));
            }
        }
        detail_lines.push(Line::from(""));
        if self.state == AppState::Comment {
            detail_lines.push(Line::styled(
                format!("> {}_", self.comment_input.value),
                Style::default().fg(Color::Yellow),
            ));
            detail_lines.push(Line::from("Enter: Post | Esc: Cancel"));
        } else {
            detail_lines.push(Line::from("c: Add comment"));
        }

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(phase_color(column.phase)).add_modifier(Modifier::BOLD));
        let popup = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_form(&self, f: &mut Frame) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let area = centered_rect(60, 50, f.area());
        f.render_widget(Clear, area);

        let field_style = |order: usize| {
            if form.current_field == order {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };
        let estimate_line = match form.kind {
            BoardKind::Kanban => format!("Priority:    < {} >", format_priority(form.priorities[form.priority])),
            BoardKind::Scrum => format!("Points:      {}", form.points.value),
        };

        let lines = vec![
            Line::from(""),
            Line::styled(format!("Title:       {}", form.title.value), field_style(TITLE_GLOBAL_ORDER)),
            Line::styled(
                format!("Description: {}", form.description.value),
                field_style(DESCRIPTION_GLOBAL_ORDER),
            ),
            Line::styled(
                format!("Assignee:    < {} >", form.selected_assignee().name),
                field_style(ASSIGNEE_GLOBAL_ORDER),
            ),
            Line::styled(estimate_line, field_style(ESTIMATE_GLOBAL_ORDER)),
            Line::from(""),
            Line::from("Tab/Up/Down: Field | Left/Right: Change | Enter: Save | Esc: Cancel"),
        ];

        let title = if self.state == AppState::EditTask { "Edit Task" } else { "New Task" };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(Color::Black));
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame) {
        let area = centered_rect(50, 25, f.area());
        f.render_widget(Clear, area);

        let what = self
            .pending_delete
            .as_ref()
            .map(|p| format!("Delete '{}'", p.title))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(what),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Confirm Action").borders(Borders::ALL).style(Style::default().bg(DARK_RED)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame) {
        let area = centered_rect(60, 70, f.area());
        f.render_widget(Clear, area);
        let lines: Vec<Line> = [
            "Left/Right      Select column",
            "Up/Down         Select card",
            "Ctrl+Left/Right Move card to neighbouring column",
            "Ctrl+Up/Down    Reorder card within column",
            "Enter           Task details",
            "c (in details)  Add comment",
            "n               New task (to do)",
            "a               Quick add to selected column",
            "e               Edit task",
            "x / Delete      Delete task",
            "t               Switch team",
            "Tab             Next sprint (Scrum)",
            "s               New sprint (Scrum)",
            "q / Esc         Quit",
        ]
        .into_iter()
        .map(Line::from)
        .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help (Enter to close)"))
            .style(Style::default().bg(Color::Black));
        f.render_widget(paragraph, area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, color: Color, highlighted: bool) {
    let style = if highlighted {
        Style::default().bg(color).fg(text_on(color)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };
    let width = area.width.saturating_sub(2) as usize;

    let card_text = vec![
        Line::from(truncate(&task.title, width)),
        Line::from(format!(
            "{} | {} {}",
            format_estimate(task.estimate),
            task.assignee.initials,
            format_badges(task)
        )),
        Line::from(truncate(&task.id, width)),
    ];
    let card = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(card, area);
}

/// A rectangle centred in `area`, sized as percentages of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
