//! Team selection.
//!
//! Boards belong to a team. `TeamContext` holds the list of teams and which
//! one is selected; it is passed to whoever builds boards instead of living in
//! global state. Selecting a different team is the caller's cue to
//! re-initialize its board from that team's seed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::task::Assignee;

/// A team and the people tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub members: Vec<Assignee>,
}

impl Team {
    pub fn new(label: &str, value: &str) -> Self {
        Team {
            label: label.to_string(),
            value: value.to_string(),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Assignee>) -> Self {
        self.members = members;
        self
    }

    /// Members offered by the task form, ending with the unassigned option.
    pub fn assignable(&self) -> Vec<Assignee> {
        let mut people = self.members.clone();
        let unassigned = Assignee::unassigned();
        if !people.contains(&unassigned) {
            people.push(unassigned);
        }
        people
    }
}

/// The available teams and the selected one.
#[derive(Debug, Clone)]
pub struct TeamContext {
    teams: Vec<Team>,
    selected: usize,
}

impl TeamContext {
    /// Build a context selecting the first team. An empty list gets a single
    /// "Default" team so there is always a selection.
    pub fn new(teams: Vec<Team>) -> Self {
        let teams = if teams.is_empty() {
            vec![Team::new("Default", "default")]
        } else {
            teams
        };
        TeamContext { teams, selected: 0 }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn selected(&self) -> &Team {
        &self.teams[self.selected]
    }

    /// Select a team by value.
    pub fn select(&mut self, value: &str) -> Result<&Team> {
        let index = self
            .teams
            .iter()
            .position(|t| t.value == value)
            .ok_or_else(|| BoardError::TeamNotFound { value: value.to_string() })?;
        self.selected = index;
        debug!(team = value, "selected team");
        Ok(&self.teams[index])
    }

    /// Select the next team, wrapping around.
    pub fn cycle(&mut self) -> &Team {
        self.selected = (self.selected + 1) % self.teams.len();
        &self.teams[self.selected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TeamContext {
        TeamContext::new(vec![
            Team::new("Development", "development"),
            Team::new("Design", "design"),
        ])
    }

    #[test]
    fn test_select_and_cycle() {
        let mut ctx = context();
        assert_eq!(ctx.selected().value, "development");
        assert_eq!(ctx.select("design").unwrap().label, "Design");
        assert_eq!(ctx.cycle().value, "development");
        assert_eq!(ctx.cycle().value, "design");
    }

    #[test]
    fn test_unknown_team_keeps_selection() {
        let mut ctx = context();
        assert!(matches!(ctx.select("sales"), Err(BoardError::TeamNotFound { .. })));
        assert_eq!(ctx.selected().value, "development");
    }

    #[test]
    fn test_empty_context_has_default_team() {
        let ctx = TeamContext::new(Vec::new());
        assert_eq!(ctx.selected().value, "default");
        assert_eq!(ctx.selected().assignable(), vec![Assignee::unassigned()]);
    }
}
