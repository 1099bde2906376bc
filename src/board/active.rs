//! Active-task pointer.
//!
//! A single title stored beside the records as `active.json`, a bare JSON
//! string. The pointer lives outside the task index and is persisted on
//! every change instead of going through the flush queue. Concurrent
//! set/clear is last-writer-wins.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File the pointer is stored in, beside the `.task` records.
pub const ACTIVE_FILE: &str = "active.json";

#[derive(Debug)]
pub struct ActiveTask {
    path: PathBuf,
    current: RwLock<Option<String>>,
}

impl ActiveTask {
    /// Loads the pointer from `dir`. An absent or unreadable file means no
    /// active task.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(ACTIVE_FILE);
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<String>(&raw).ok())
            .filter(|title| !title.is_empty());
        ActiveTask { path, current: RwLock::new(current) }
    }

    pub fn get(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Stores and persists a new active title. Existence of the title among
    /// the board's records is the caller's check.
    pub fn set(&self, title: &str) -> Result<()> {
        *self.current.write() = Some(title.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create board directory {}", parent.display()))?;
        }
        let json = serde_json::to_string(title).context("Failed to serialize active task")?;
        fs::write(&self.path, json).with_context(|| format!("Failed to write active task file {}", self.path.display()))?;
        Ok(())
    }

    /// Clears the pointer and removes its file.
    pub fn clear(&self) -> Result<()> {
        *self.current.write() = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to delete active task file {}", self.path.display())),
        }
    }
}
