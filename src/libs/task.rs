//! Task record, identity keys and tag normalization.
//!
//! A task's identity is its title folded down to lowercase alphanumerics.
//! The folded form doubles as the file stem on disk, so a record's path can
//! always be recomputed from its current title.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Title applied when a task file lacks a usable `Title` field.
pub const DEFAULT_TITLE: &str = "untitled Task...";

/// Description given to fresh records and files lacking `Description`.
pub const DEFAULT_DESCRIPTION: &str = "empty description...";

/// Validation failures for titles and tags, rejected before any mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error("task title {0:?} is empty or not parsable")]
    Title(String),
    #[error("tag {0:?} is empty or not parsable")]
    Tag(String),
}

/// Case-insensitive task identity.
///
/// Built by stripping every non-alphanumeric character from the title and
/// lowercasing the rest, so `"Clean House"` and `"clean-house"` share one
/// identity. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskKey(String);

impl TaskKey {
    /// Folds a raw title into its identity key.
    pub fn parse(title: &str) -> Result<Self, ValidateError> {
        let folded = fold(title);
        if folded.is_empty() {
            return Err(ValidateError::Title(title.to_string()));
        }
        Ok(TaskKey(folded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a tag with the same folding rule titles use.
pub fn normalize_tag(raw: &str) -> Result<String, ValidateError> {
    let folded = fold(raw);
    if folded.is_empty() {
        return Err(ValidateError::Tag(raw.to_string()));
    }
    Ok(folded)
}

fn fold(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

/// A single task's in-memory state.
///
/// Plain data holder; all mutation and re-indexing goes through the board,
/// which keeps the lookup buckets in step with these fields.
#[derive(Debug, Clone)]
pub struct Task {
    /// Display title, original casing kept. Never empty.
    pub title: String,
    pub description: String,
    pub urgent: bool,
    pub important: bool,
    /// Normalized tags.
    pub tags: BTreeSet<String>,
    /// True while in-memory changes have not reached disk.
    pub dirty: bool,
}

impl Task {
    /// Blank record for a freshly created title. Starts dirty.
    pub fn new(title: &str) -> Self {
        Task {
            title: title.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            urgent: false,
            important: false,
            tags: BTreeSet::new(),
            dirty: true,
        }
    }

    /// Identity derived from the current display title.
    ///
    /// Titles only enter a record after passing [`TaskKey::parse`], so the
    /// folded form is never empty here.
    pub fn key(&self) -> TaskKey {
        TaskKey(fold(&self.title))
    }
}

/// Field changes applied through `Board::update`; `None` leaves a field
/// untouched. `tags` replaces the whole tag set.
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub rename: Option<String>,
    pub description: Option<String>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Detached snapshot of a record, for display and serialization.
///
/// Serializes with the camelCase field names clients consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub title: String,
    pub description: String,
    pub is_urgent: bool,
    pub is_important: bool,
    pub tags: Vec<String>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        TaskView {
            title: task.title.clone(),
            description: task.description.clone(),
            is_urgent: task.urgent,
            is_important: task.important,
            tags: task.tags.iter().cloned().collect(),
        }
    }
}
