use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Kanban and Scrum boards in the terminal.
/// Boards start from a seed catalog: the built-in demo teams, or a JSON file
/// passed via --seed.
#[derive(Parser)]
#[command(name = "board", version, about = "Kanban and Scrum board manager")]
pub struct Cli {
    /// Path to a JSON seed catalog.
    #[arg(long, global = true, env = "TASKBOARD_SEED")]
    pub seed: Option<PathBuf>,

    /// Team to open, by value (e.g. "design").
    #[arg(long, global = true, env = "TASKBOARD_TEAM")]
    pub team: Option<String>,

    /// Log board operations at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
