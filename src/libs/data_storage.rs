//! Platform data directory resolution.
//!
//! All of eisen's files live under one per-user application directory:
//! `%LOCALAPPDATA%\eisen` on Windows, `~/Library/Application Support/eisen`
//! on macOS and `~/.local/share/eisen` elsewhere. The configuration file
//! sits at the top; each board keeps its task files in `boards/<name>/`.

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "eisen";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_NAME);

        Self { base_path }
    }

    /// Path for a file in the application directory, creating the directory
    /// first when missing.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    /// Directory a board's task files live in. Not created here; the board
    /// creates it lazily at the first flush.
    pub fn board_dir(&self, name: &str) -> PathBuf {
        self.base_path.join("boards").join(name)
    }
}
