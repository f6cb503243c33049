//! # board - Kanban and Scrum boards in the terminal
//!
//! A board state manager with an interactive terminal interface and a small
//! scripting CLI.
//!
//! ## Key Features
//!
//! - **Two board styles**: a Kanban board with prioritised cards and a Scrum
//!   board whose sprints each carry their own four columns of pointed cards
//! - **Predictable moves**: every move removes the card and re-inserts it at
//!   the destination index; invalid requests are rejected without touching
//!   the board
//! - **Teams**: each team starts from its own seed data; switching team
//!   rebuilds the board from scratch
//! - **Replay scripts**: JSON lists of board operations for reproducing a
//!   session from the command line
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive Kanban board for the first team
//! board ui
//!
//! # Scrum board for the design team
//! board ui --scrum --team design
//!
//! # Print sprint 2
//! board show --sprint sprint-2
//!
//! # High-priority backlog items of the marketing team
//! board backlog --team marketing --priority high
//!
//! # Apply a script of operations and print the result
//! board replay moves.json --scrum
//! ```
//!
//! ## Seed Data
//!
//! Without `--seed` the built-in demo teams are used. A seed catalog is a JSON
//! object with a `teams` array; each team has a `label`, a `value`, optional
//! `members`, a `kanban` map from column id to tasks, and a list of `sprints`.
//! Column keys may be the phase id (`todo`, `in-progress`, `review`, `done`)
//! or, for sprints, the namespaced id (`todo-sprint-2`).
//!
//! Boards live in memory only; nothing is written back to the seed file.

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod backlog;
pub mod board;
pub mod cli;
pub mod cmd;
pub mod column;
pub mod context;
pub mod display;
pub mod drag;
pub mod error;
pub mod fields;
pub mod ops;
pub mod scrum;
pub mod seed;
pub mod task;
pub mod tui {
    pub mod board_view;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;
use seed::SeedCatalog;

/// Log to stderr so logs never interleave with printed boards. `RUST_LOG`
/// overrides the default filter.
fn init_tracing(verbose: bool, interactive: bool) {
    let crate_name = env!("CARGO_CRATE_NAME");
    let default = if interactive {
        // stderr shares the terminal with the alternate screen
        "off".to_string()
    } else if verbose {
        format!("{}=debug,warn", crate_name)
    } else {
        format!("{}=info,warn", crate_name)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, matches!(cli.command, Commands::Ui { .. }));

    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let catalog = match SeedCatalog::load_or_builtin(cli.seed.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: failed to load seed catalog: {}", e);
            std::process::exit(1);
        }
    };

    let mut teams = catalog.team_context();
    if let Some(value) = cli.team.as_deref() {
        if let Err(e) = teams.select(value) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Ui { scrum } => cmd_ui(catalog, teams, scrum),

        Commands::Show { scrum, sprint } => cmd_show(&catalog, &teams, scrum, sprint),

        Commands::Summary { scrum } => cmd_summary(&catalog, &teams, scrum),

        Commands::Backlog { priority, search } => cmd_backlog(&catalog, &teams, priority, search),

        Commands::Teams => cmd_teams(&teams),

        Commands::Replay { script, scrum } => cmd_replay(&catalog, &teams, script, scrum),

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
