//! Seed catalogs.
//!
//! A catalog lists teams and, for each team, the tasks its Kanban board and
//! its Scrum sprints start with. Catalogs are read from a JSON file or taken
//! from the built-in demo data; they are never written back.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backlog::{default_backlog, BacklogItem};
use crate::board::{KanbanBoard, Seed};
use crate::context::{Team, TeamContext};
use crate::error::Result;
use crate::fields::Priority;
use crate::scrum::{ScrumBoard, SprintSeed};
use crate::task::{Assignee, Estimate, Task};

/// One team's starting data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSeed {
    #[serde(flatten)]
    pub team: Team,
    #[serde(default)]
    pub kanban: Seed,
    #[serde(default)]
    pub sprints: Vec<SprintSeed>,
    #[serde(default)]
    pub backlog: Vec<BacklogItem>,
}

/// All teams and their starting data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    pub teams: Vec<TeamSeed>,
}

impl SeedCatalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let catalog: SeedCatalog = serde_json::from_str(&buf)?;
        info!(path = %path.display(), teams = catalog.teams.len(), "loaded seed catalog");
        Ok(catalog)
    }

    /// Load from `path` if given, else use the built-in demo data.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                debug!("using built-in seed catalog");
                Ok(Self::builtin())
            }
        }
    }

    pub fn team_context(&self) -> TeamContext {
        TeamContext::new(self.teams.iter().map(|t| t.team.clone()).collect())
    }

    fn entry(&self, team: &Team) -> Option<&TeamSeed> {
        self.teams.iter().find(|t| t.team.value == team.value)
    }

    /// The Kanban seed for a team, or the one-task default seed when the
    /// catalog has none for it.
    pub fn kanban_seed(&self, team: &Team) -> Seed {
        match self.entry(team) {
            Some(entry) if !entry.kanban.is_empty() => entry.kanban.clone(),
            _ => default_seed(),
        }
    }

    pub fn sprint_seeds(&self, team: &Team) -> Vec<SprintSeed> {
        self.entry(team).map(|e| e.sprints.clone()).unwrap_or_default()
    }

    /// The team's product backlog, or the one-item default backlog.
    pub fn backlog(&self, team: &Team) -> Vec<BacklogItem> {
        match self.entry(team) {
            Some(entry) if !entry.backlog.is_empty() => entry.backlog.clone(),
            _ => default_backlog(),
        }
    }

    pub fn kanban_board(&self, team: &Team) -> KanbanBoard {
        KanbanBoard::new(team.clone(), &self.kanban_seed(team))
    }

    pub fn scrum_board(&self, team: &Team) -> ScrumBoard {
        ScrumBoard::from_sprints(team.clone(), &self.sprint_seeds(team))
    }

    /// Demo data: three teams with a handful of tasks each.
    pub fn builtin() -> Self {
        let ana = person("Ana M.", "AM");
        let juan = person("Juan D.", "JD");
        let roberto = person("Roberto K.", "RK");
        let teresa = person("Teresa S.", "TS");
        let laura = person("Laura P.", "LP");
        let carlos = person("Carlos M.", "CM");
        let sofia = person("Sofia T.", "ST");
        let miguel = person("Miguel A.", "MA");

        let development = TeamSeed {
            team: Team::new("Development Team", "development").with_members(vec![
                ana.clone(),
                juan.clone(),
                roberto.clone(),
                teresa.clone(),
            ]),
            kanban: columns(vec![
                ("todo", vec![
                    card("task-1-dev", "Implement OAuth authentication", "Integrate sign-in with external providers", Estimate::Priority(Priority::High), &juan, 5, 1),
                    card("task-2-dev", "Optimise database queries", "Improve performance of the main queries", Estimate::Priority(Priority::Medium), &roberto, 2, 0),
                ]),
                ("in-progress", vec![
                    card("task-3-dev", "Implement REST API", "Create endpoints for the new module", Estimate::Priority(Priority::High), &ana, 3, 2),
                ]),
            ]),
            sprints: vec![
                SprintSeed {
                    name: Some("Sprint 1".into()),
                    start: "May 1".into(),
                    end: "May 15".into(),
                    progress: 65,
                    columns: columns(vec![
                        ("todo", vec![card("task-1-sprint-1", "Design new home page", "Mockups and prototypes for the home page", Estimate::Points(5), &ana, 3, 2)]),
                        ("in-progress", vec![card("task-2-sprint-1", "Implement OAuth authentication", "Integrate sign-in with external providers", Estimate::Points(8), &juan, 5, 1)]),
                        ("review", vec![card("task-3-sprint-1", "Optimise database queries", "Improve performance of the main queries", Estimate::Points(3), &roberto, 2, 0)]),
                        ("done", vec![card("task-4-sprint-1", "Write API documentation", "Document REST endpoints and parameters", Estimate::Points(2), &teresa, 1, 3)]),
                    ]),
                },
                SprintSeed {
                    name: Some("Sprint 2".into()),
                    start: "May 16".into(),
                    end: "May 31".into(),
                    progress: 10,
                    columns: columns(vec![
                        ("todo", vec![
                            card("task-5-sprint-2", "Build notification system", "Real-time notifications", Estimate::Points(8), &juan, 2, 0),
                            card("task-6-sprint-2", "Design user profile page", "Mockups and prototypes for the profile page", Estimate::Points(5), &ana, 1, 1),
                        ]),
                        ("in-progress", vec![card("task-7-sprint-2", "Integrate payment gateway", "Stripe integration", Estimate::Points(13), &teresa, 3, 2)]),
                    ]),
                },
            ],
            backlog: vec![
                pbi("PBI-1-dev", "Implement user authentication", Priority::High, 8, &juan),
                pbi("PBI-2-dev", "Optimise database queries", Priority::High, 5, &roberto),
                pbi("PBI-3-dev", "Implement REST API", Priority::Medium, 13, &ana),
                pbi("PBI-4-dev", "Design user interface", Priority::Medium, 5, &teresa),
            ],
        };

        let design = TeamSeed {
            team: Team::new("Design Team", "design").with_members(vec![laura.clone(), carlos.clone()]),
            kanban: columns(vec![
                ("todo", vec![card("task-1-design", "Design new home page", "Mockups and prototypes for the home page", Estimate::Priority(Priority::High), &laura, 4, 3)]),
                ("in-progress", vec![card("task-2-design", "Create custom icons", "Icon set for the application", Estimate::Priority(Priority::Medium), &carlos, 1, 5)]),
                ("review", vec![card("task-3-design", "Update style guide", "Review and update the corporate style guide", Estimate::Priority(Priority::Low), &laura, 2, 1)]),
            ]),
            sprints: Vec::new(),
            backlog: vec![
                pbi("PBI-1-design", "Design new home page", Priority::High, 5, &laura),
                pbi("PBI-2-design", "Create custom icons", Priority::Low, 3, &carlos),
                pbi("PBI-3-design", "Update style guide", Priority::Medium, 3, &laura),
            ],
        };

        let marketing = TeamSeed {
            team: Team::new("Marketing Team", "marketing").with_members(vec![sofia.clone(), miguel.clone()]),
            kanban: columns(vec![
                ("todo", vec![card("task-1-mkt", "Plan launch campaign", "Channels, budget and timeline for the launch", Estimate::Priority(Priority::High), &sofia, 2, 1)]),
                ("done", vec![card("task-2-mkt", "Publish monthly newsletter", "Write and send the May newsletter", Estimate::Priority(Priority::Low), &miguel, 0, 1)]),
            ]),
            sprints: Vec::new(),
            backlog: vec![
                pbi("PBI-1-mkt", "Plan social media campaign", Priority::High, 8, &sofia),
                pbi("PBI-2-mkt", "Write blog content", Priority::Medium, 5, &miguel),
                pbi("PBI-3-mkt", "Competitor analysis", Priority::Low, 3, &sofia),
                pbi("PBI-4-mkt", "Design promotional material", Priority::Medium, 5, &miguel),
            ],
        };

        SeedCatalog {
            teams: vec![development, design, marketing],
        }
    }
}

/// The board shown when a team has no seed of its own.
pub fn default_seed() -> Seed {
    columns(vec![(
        "todo",
        vec![card(
            "task-default-1",
            "Example task",
            "This is an example task",
            Estimate::Priority(Priority::Medium),
            &person("User", "US"),
            0,
            0,
        )],
    )])
}

fn person(name: &str, initials: &str) -> Assignee {
    Assignee {
        initials: initials.to_string(),
        ..Assignee::named(name)
    }
}

fn pbi(id: &str, title: &str, priority: Priority, points: u32, assignee: &Assignee) -> BacklogItem {
    BacklogItem {
        id: id.to_string(),
        title: title.to_string(),
        priority,
        points,
        assignee: assignee.clone(),
    }
}

fn columns(entries: Vec<(&str, Vec<Task>)>) -> Seed {
    entries
        .into_iter()
        .map(|(id, tasks)| (id.to_string(), tasks))
        .collect()
}

fn card(
    id: &str,
    title: &str,
    description: &str,
    estimate: Estimate,
    assignee: &Assignee,
    comments: u32,
    attachments: u32,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        estimate,
        assignee: assignee.clone(),
        comments,
        attachments,
        thread: Vec::new(),
    }
}
