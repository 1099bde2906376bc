//! Application configuration initialization command.
//!
//! Provides an interactive setup wizard that walks through the board
//! settings for first-time use. Re-running it pre-fills the current values,
//! so it doubles as a settings editor.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

/// Command-line arguments for the initialization command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating a new one
    ///
    /// Deletes the configuration file, resetting the application to its
    /// built-in defaults.
    #[arg(short, long)]
    delete: bool,
}

/// Executes the initialization command.
///
/// Runs the interactive wizard and saves the result, or removes the
/// configuration file when `--delete` is given.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        Config::delete()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
