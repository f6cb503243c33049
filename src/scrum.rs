//! Scrum boards: an ordered list of sprints, each with its own four columns.
//!
//! Exactly one sprint is active at a time. Adding, moving and editing tasks
//! act on the active sprint; deleting names its sprint explicitly. Sprints
//! can be appended but never removed or reordered.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{BoardOps, ColumnSet, MoveOutcome, Seed};
use crate::column::Column;
use crate::context::Team;
use crate::error::{BoardError, Result};
use crate::fields::{BoardKind, Phase};
use crate::task::Task;

const PLACEHOLDER_START: &str = "Jun 1";
const PLACEHOLDER_END: &str = "Jun 15";

/// A time-boxed iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    /// Informational only, never derived from the columns.
    pub progress: u8,
    pub columns: ColumnSet,
}

impl Sprint {
    fn numbered(n: usize, name: String, start: String, end: String, progress: u32, seed: &Seed) -> Self {
        let id = format!("sprint-{}", n);
        Sprint {
            columns: ColumnSet::from_seed(seed, Some(&id)),
            id,
            name,
            start,
            end,
            progress: progress.min(100) as u8,
        }
    }

    /// Id of this sprint's column for `phase`.
    pub fn column_id(&self, phase: Phase) -> &str {
        &self.columns.column_for_phase(phase).id
    }
}

/// Seed-file description of a sprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SprintSeed {
    pub name: Option<String>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub columns: Seed,
}

/// A team's Scrum board.
#[derive(Debug, Clone)]
pub struct ScrumBoard {
    team: Team,
    sprints: Vec<Sprint>,
    active: usize,
}

impl ScrumBoard {
    /// A board with a single sprint filled from `seed`.
    pub fn new(team: Team, seed: &Seed) -> Self {
        let mut board = ScrumBoard {
            team,
            sprints: Vec::new(),
            active: 0,
        };
        board.initialize(seed);
        board
    }

    /// A board with one sprint per seed entry, the first one active.
    pub fn from_sprints(team: Team, seeds: &[SprintSeed]) -> Self {
        if seeds.is_empty() {
            return Self::new(team, &Seed::new());
        }
        let sprints = seeds
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let n = i + 1;
                Sprint::numbered(
                    n,
                    s.name.clone().unwrap_or_else(|| format!("Sprint {}", n)),
                    s.start.clone(),
                    s.end.clone(),
                    s.progress,
                    &s.columns,
                )
            })
            .collect();
        ScrumBoard {
            team,
            sprints,
            active: 0,
        }
    }

    /// Replace every sprint with a single `sprint-1` filled from the seed.
    pub fn initialize(&mut self, seed: &Seed) {
        self.sprints = vec![Sprint::numbered(
            1,
            "Sprint 1".to_string(),
            String::new(),
            String::new(),
            0,
            seed,
        )];
        self.active = 0;
        debug!(team = %self.team.value, "initialized scrum board");
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn active(&self) -> &Sprint {
        &self.sprints[self.active]
    }

    fn active_mut(&mut self) -> &mut Sprint {
        &mut self.sprints[self.active]
    }

    pub fn sprint(&self, sprint_id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == sprint_id)
    }

    fn sprint_index(&self, sprint_id: &str) -> Result<usize> {
        self.sprints
            .iter()
            .position(|s| s.id == sprint_id)
            .ok_or_else(|| BoardError::sprint_not_found(sprint_id))
    }

    /// Make another sprint the active one.
    pub fn set_active(&mut self, sprint_id: &str) -> Result<&Sprint> {
        self.active = self.sprint_index(sprint_id)?;
        debug!(sprint = sprint_id, "activated sprint");
        Ok(self.active())
    }

    /// Activate the next sprint, wrapping around.
    pub fn cycle_active(&mut self) -> &Sprint {
        self.active = (self.active + 1) % self.sprints.len();
        self.active()
    }

    /// Append a new, empty sprint and make it active.
    pub fn add_sprint(&mut self) -> &Sprint {
        let n = self.sprints.len() + 1;
        let sprint = Sprint::numbered(
            n,
            format!("Sprint {}", n),
            PLACEHOLDER_START.to_string(),
            PLACEHOLDER_END.to_string(),
            0,
            &Seed::new(),
        );
        debug!(sprint = %sprint.id, "added sprint");
        self.sprints.push(sprint);
        self.active = self.sprints.len() - 1;
        self.active()
    }

    /// Append a task to the to-do column of the active sprint.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        let column_id = self.active().column_id(Phase::Todo).to_string();
        self.add_task_to(task, &column_id)
    }

    /// Remove a task from a column of a specific sprint.
    pub fn delete_task_in(
        &mut self,
        task_id: &str,
        column_id: &str,
        sprint_id: &str,
    ) -> Result<Option<Task>> {
        let index = self.sprint_index(sprint_id)?;
        self.sprints[index].columns.delete_task(task_id, column_id)
    }
}

impl BoardOps for ScrumBoard {
    fn kind(&self) -> BoardKind {
        BoardKind::Scrum
    }

    fn columns(&self) -> &[Column] {
        self.active().columns.columns()
    }

    fn add_task_to(&mut self, task: Task, column_id: &str) -> Result<()> {
        self.active_mut()
            .columns
            .add_task(task, column_id)
            .inspect_err(|e| warn!(error = %e, "add rejected"))
    }

    fn move_task(
        &mut self,
        task_id: &str,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Result<MoveOutcome> {
        self.active_mut()
            .columns
            .move_task(task_id, source_column, source_index, dest_column, dest_index)
    }

    fn edit_task(&mut self, updated: Task) -> bool {
        self.active_mut().columns.edit_task(updated)
    }

    fn delete_task(&mut self, task_id: &str, column_id: &str) -> Result<Option<Task>> {
        self.active_mut().columns.delete_task(task_id, column_id)
    }
}
