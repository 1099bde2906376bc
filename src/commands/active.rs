//! Active task commands.
//!
//! The bare form prints the persisted active title. `set` requires the task
//! to already exist on the board; it is the one place that refuses to
//! materialize a record on demand.

use crate::libs::messages::Message;
use crate::{msg_error, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ActiveArgs {
    #[command(subcommand)]
    command: Option<ActiveCommand>,
}

#[derive(Debug, Subcommand)]
enum ActiveCommand {
    /// Point the active marker at an existing task
    Set {
        /// Task title
        title: String,
    },
    /// Clear the active marker
    Clear,
}

pub fn cmd(args: ActiveArgs) -> Result<()> {
    match args.command {
        Some(ActiveCommand::Set { title }) => handle_set(title),
        Some(ActiveCommand::Clear) => handle_clear(),
        None => handle_show(),
    }
}

fn handle_show() -> Result<()> {
    match super::open_board()?.active() {
        Some(title) => msg_print!(Message::ActiveTask(title)),
        None => msg_print!(Message::NoActiveTask),
    }
    Ok(())
}

fn handle_set(title: String) -> Result<()> {
    let board = super::open_board()?;
    if board.find(&title)?.is_none() {
        msg_error!(Message::TaskNotFound(title));
        return Ok(());
    }
    let stored = board.set_active(&title)?;
    msg_success!(Message::ActiveTaskSet(stored));
    Ok(())
}

fn handle_clear() -> Result<()> {
    super::open_board()?.clear_active()?;
    msg_success!(Message::ActiveTaskCleared);
    Ok(())
}
