//! Command implementations for the CLI interface.
//!
//! Each subcommand builds a fresh board for the selected team from the seed
//! catalog. Nothing is written back: boards live for the length of one
//! command (or one TUI session).

use std::fmt::Display;
use std::fs;
use std::path::Path;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::backlog::filter_backlog;
use crate::board::BoardOps;
use crate::context::TeamContext;
use crate::display::{print_backlog, print_board, print_sprint_header, print_summary};
use crate::error::Result;
use crate::fields::{BoardKind, Priority};
use crate::ops::{apply_all, AnyBoard, BoardOp};
use crate::seed::SeedCatalog;
use crate::tui::board_view::BoardApp;
use crate::tui::run::run_board_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board.
    Ui {
        /// Open the Scrum board instead of the Kanban board.
        #[arg(long)]
        scrum: bool,
    },

    /// Print the board.
    Show {
        /// Show the Scrum board.
        #[arg(long)]
        scrum: bool,
        /// Sprint to show (implies --scrum). Defaults to the first sprint.
        #[arg(long)]
        sprint: Option<String>,
    },

    /// Task counts and story points per column.
    Summary {
        /// Summarise the active sprint of the Scrum board.
        #[arg(long)]
        scrum: bool,
    },

    /// List the team's product backlog.
    Backlog {
        /// Only items with this priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Case-insensitive search over id and title.
        #[arg(long)]
        search: Option<String>,
    },

    /// List teams and their members.
    Teams,

    /// Apply a JSON script of board operations, then print the board.
    Replay {
        /// Path to a JSON array of operations.
        script: String,
        /// Replay against the Scrum board.
        #[arg(long)]
        scrum: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn board_kind(scrum: bool) -> BoardKind {
    if scrum {
        BoardKind::Scrum
    } else {
        BoardKind::Kanban
    }
}

/// Report a failed command and exit.
fn fail(e: impl Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

/// Launch the terminal user interface.
pub fn cmd_ui(catalog: SeedCatalog, teams: TeamContext, scrum: bool) {
    let mut app = BoardApp::new(catalog, teams, board_kind(scrum));
    if let Err(e) = run_board_tui(&mut app) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print a board, or every sprint header followed by the active sprint.
pub fn cmd_show(catalog: &SeedCatalog, teams: &TeamContext, scrum: bool, sprint: Option<String>) {
    let kind = board_kind(scrum || sprint.is_some());
    let mut board = AnyBoard::build(kind, catalog, teams.selected());

    if let (Some(sprint), Some(scrum)) = (sprint.as_deref(), board.as_scrum_mut()) {
        if let Err(e) = scrum.set_active(sprint) {
            fail(e);
        }
    }

    print_heading(&board);
    print_board(board.columns());
}

fn print_heading(board: &AnyBoard) {
    match board.as_scrum() {
        Some(scrum) => {
            println!("Scrum board - {}", scrum.team().label);
            for sprint in scrum.sprints() {
                print_sprint_header(sprint, sprint.id == scrum.active().id);
            }
        }
        None => println!("Kanban board - {}", board.team().label),
    }
    println!();
}

/// Print per-column counts and point totals.
pub fn cmd_summary(catalog: &SeedCatalog, teams: &TeamContext, scrum: bool) {
    let board = AnyBoard::build(board_kind(scrum), catalog, teams.selected());
    if let Some(scrum) = board.as_scrum() {
        println!("{} ({})", scrum.active().name, scrum.team().label);
    } else {
        println!("{}", board.team().label);
    }
    print_summary(board.columns());
}

/// Print the selected team's backlog, optionally filtered.
pub fn cmd_backlog(
    catalog: &SeedCatalog,
    teams: &TeamContext,
    priority: Option<Priority>,
    search: Option<String>,
) {
    let team = teams.selected();
    let items = catalog.backlog(team);
    println!("Product backlog - {}", team.label);
    print_backlog(&filter_backlog(&items, search.as_deref(), priority));
}

/// List teams, marking the selected one.
pub fn cmd_teams(teams: &TeamContext) {
    for team in teams.teams() {
        let marker = if team.value == teams.selected().value { "*" } else { " " };
        println!("{} {:<20} {}", marker, team.label, team.value);
        if team.members.is_empty() {
            println!("    -");
        }
        for member in &team.members {
            println!("    {:<3} {}", member.initials, member.name);
        }
    }
}

fn load_script(path: &Path) -> Result<Vec<BoardOp>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Apply a script of operations in order, reporting rejections as notices.
pub fn cmd_replay(catalog: &SeedCatalog, teams: &TeamContext, script: String, scrum: bool) {
    let ops = load_script(Path::new(&script)).unwrap_or_else(|e| fail(e));
    info!(script = %script, operations = ops.len(), "replaying");

    let mut board = AnyBoard::build(board_kind(scrum), catalog, teams.selected());
    let results = apply_all(&mut board, ops);

    let rejected = results.iter().filter(|r| r.is_err()).count();
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(msg) => println!("{:>3}  {}", i + 1, msg),
            Err(e) => println!("{:>3}  notice: {}", i + 1, e),
        }
    }
    println!("{} applied, {} rejected", results.len() - rejected, rejected);
    println!();

    print_heading(&board);
    print_board(board.columns());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
