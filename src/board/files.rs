//! On-disk task files.
//!
//! One JSON object per record at `<dir>/<key>.task`, written with stable
//! pretty indentation. The PascalCase keys are the format the board has
//! always stored, so files survive version changes. The directory itself is
//! only created when the first file is written.

use crate::libs::messages::Message;
use crate::libs::task::{normalize_tag, Task, TaskKey, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::msg_warning;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension task records are stored under.
pub const TASK_EXT: &str = "task";

/// Wire form of a record. Missing fields take their historical defaults at
/// deserialization time.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskFile {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_description")]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    is_urgent: bool,
    #[serde(default)]
    is_important: bool,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl From<&Task> for TaskFile {
    fn from(task: &Task) -> Self {
        TaskFile {
            title: task.title.clone(),
            description: task.description.clone(),
            tags: task.tags.iter().cloned().collect(),
            is_urgent: task.urgent,
            is_important: task.important,
        }
    }
}

/// Reads and writes the per-record files of one board directory.
#[derive(Debug, Clone)]
pub struct TaskFiles {
    dir: PathBuf,
}

impl TaskFiles {
    pub fn new(dir: PathBuf) -> Self {
        TaskFiles { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a record with this identity is stored at. Recomputed from the
    /// key on every call, never cached across renames.
    pub fn path_for(&self, key: &TaskKey) -> PathBuf {
        self.dir.join(format!("{}.{}", key, TASK_EXT))
    }

    pub fn exists(&self, key: &TaskKey) -> bool {
        self.path_for(key).is_file()
    }

    /// Loads one record file. Fails when the file is unreadable or not valid
    /// JSON; the caller decides how to fall back. Loaded records are clean.
    pub fn load(&self, key: &TaskKey) -> Result<Task> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).with_context(|| format!("Failed to read task file {}", path.display()))?;
        let file: TaskFile = serde_json::from_str(&raw).with_context(|| format!("Failed to parse task file {}", path.display()))?;
        Ok(materialize(key, file))
    }

    /// Writes one record file, creating the board directory on first use.
    pub fn save(&self, task: &Task) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| format!("Failed to create board directory {}", self.dir.display()))?;
        let path = self.path_for(&task.key());
        let json = serde_json::to_string_pretty(&TaskFile::from(task)).context("Failed to serialize task")?;
        fs::write(&path, json).with_context(|| format!("Failed to write task file {}", path.display()))?;
        Ok(())
    }

    /// File stems of every task file in the directory, sorted. A missing
    /// directory is an empty board.
    pub fn scan(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut stems = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| format!("Failed to read board directory {}", self.dir.display()))? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(TASK_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                stems.push(stem.to_string());
            }
        }
        stems.sort();
        Ok(stems)
    }
}

/// Removes a task file. `Ok(true)` when a file was deleted, `Ok(false)` when
/// it was already gone.
pub fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("Failed to delete task file {}", path.display())),
    }
}

/// Turns a wire record into a live one.
///
/// The display title must agree with the file stem or later saves would
/// drift to a second file; a mismatched title falls back to the stem. Tags
/// that no longer normalize are skipped.
fn materialize(key: &TaskKey, file: TaskFile) -> Task {
    let title = match TaskKey::parse(&file.title) {
        Ok(parsed) if parsed == *key => file.title,
        _ => {
            msg_warning!(Message::TaskTitleMismatch(key.to_string(), file.title.clone()));
            key.to_string()
        }
    };
    let mut tags = BTreeSet::new();
    for raw in file.tags {
        match normalize_tag(&raw) {
            Ok(tag) => {
                tags.insert(tag);
            }
            Err(_) => {
                msg_warning!(Message::TaskTagDropped(key.to_string(), raw));
            }
        }
    }
    Task {
        title,
        description: file.description,
        urgent: file.is_urgent,
        important: file.is_important,
        tags,
        dirty: false,
    }
}
