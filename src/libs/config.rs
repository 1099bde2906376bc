//! Configuration management for the eisen application.
//!
//! Settings live in one JSON file in the platform application directory and
//! cover a single module: the board. Everything has a workable default, so
//! eisen runs without any configuration at all; the file only records what
//! the user changed.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\eisen\config.json`
//! - **macOS**: `~/Library/Application Support/eisen/config.json`
//! - **Linux**: `~/.local/share/eisen/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eisen::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Load existing configuration or fall back to defaults
//! let config = Config::read()?;
//! let board = config.board.unwrap_or_default();
//! println!("Board '{}' flushes every {}s", board.name, board.flush_secs);
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Board settings.
///
/// `dir` points at the directory holding the board's task files directly;
/// when unset, the board lives under the platform data directory as
/// `boards/<name>`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoardConfig {
    /// Name of the board commands open.
    pub name: String,

    /// Directory override for the board's task files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Seconds between background flushes during interactive sessions.
    pub flush_secs: u64,
}

impl BoardConfig {
    /// Directory this board stores its task files in. Never created here;
    /// the board creates it lazily at the first flush.
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => DataStorage::new().board_dir(&self.name),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            name: "default".to_string(),
            dir: None,
            flush_secs: 30,
        }
    }
}

/// Application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    /// Board module settings; defaults apply when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing file is not an error: the application runs fine on
    /// defaults, so this simply returns `Config::default()` then. A file
    /// that exists but cannot be read or parsed does fail.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration with pretty-printed JSON, creating the
    /// application directory when missing.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file, resetting the application to its
    /// defaults. Missing file is fine.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Prompts for the board settings with the current values pre-filled,
    /// so re-running the wizard only changes what the user touches. The
    /// returned configuration still has to be saved by the caller.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.board.clone().unwrap_or_default();

        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBoardName.to_string())
            .default(default.name)
            .interact_text()?;

        let dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBoardDir.to_string())
            .default(default.dir.as_ref().map(|dir| dir.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let flush_secs: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptFlushSecs.to_string())
            .default(default.flush_secs)
            .interact_text()?;

        config.board = Some(BoardConfig {
            name,
            dir: if dir.trim().is_empty() { None } else { Some(PathBuf::from(dir.trim())) },
            flush_secs,
        });
        Ok(config)
    }
}
