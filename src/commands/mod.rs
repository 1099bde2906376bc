pub mod active;
pub mod init;
pub mod sum;
pub mod task;

use crate::board::Board;
use crate::libs::config::{BoardConfig, Config};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create, list, edit and delete tasks")]
    Task(task::TaskArgs),
    #[command(about = "Show or change the active task")]
    Active(active::ActiveArgs),
    #[command(about = "Get a board summary")]
    Sum(sum::SumArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Active(args) => active::cmd(args),
            Commands::Sum(args) => sum::cmd(args),
        }
    }
}

/// Board settings from the configuration, defaults when nothing is set.
fn board_settings() -> Result<BoardConfig> {
    Ok(Config::read()?.board.unwrap_or_default())
}

/// Loads the configured board.
fn open_board() -> Result<Board> {
    let settings = board_settings()?;
    Board::load(&settings.name, settings.resolve_dir())
}
