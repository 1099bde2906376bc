//! Display implementation for application messages.
//!
//! The single `Display` impl below is the source of truth for every piece of
//! user-facing text. Keeping the words in one place keeps tone and phrasing
//! consistent and leaves the call sites free of string literals.
//!
//! ## Text Formatting Standards
//!
//! - **Sentence case**: natural capitalization, no trailing periods
//! - **Specific details**: include the task title, key or count at hand
//! - **No prefixes**: severity emojis are added by the `msg_*` macros, never
//!   here

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === BOARD MESSAGES ===
            Message::BoardLoaded(name, count) => format!("Board '{}' holds {} tasks", name, count),
            Message::TaskStemInvalid(stem) => format!("Skipping task file with unusable name '{}'", stem),
            Message::TaskFileUnreadable(key, err) => format!("Could not read task '{}' ({}); starting blank", key, err),
            Message::TaskTitleMismatch(stem, title) => format!("Task file '{}' calls itself '{}'; keeping the stem", stem, title),
            Message::TaskTagDropped(stem, tag) => format!("Dropping unusable tag '{}' from task '{}'", tag, stem),
            Message::TaskSaveFailed(key, err) => format!("Failed to save task '{}': {}", key, err),
            Message::TrashRemoveFailed(err) => format!("Failed to remove trashed file: {}", err),
            Message::FlushCompleted(saved, removed) => format!("Saved {} tasks, removed {} files", saved, removed),
            Message::FlushFailures(count) => format!("{} flush operations failed and will be retried", count),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskNotFound(title) => format!("Task '{}' not found", title),
            Message::NoTasksOnBoard => "No tasks on this board yet".to_string(),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::TaskEditingCompleted => "Task editing completed".to_string(),

            // === ACTIVE TASK MESSAGES ===
            Message::ActiveTask(title) => format!("Active task: {}", title),
            Message::ActiveTaskSet(title) => format!("Active task set to '{}'", title),
            Message::ActiveTaskCleared => "Active task cleared".to_string(),
            Message::NoActiveTask => "No active task set".to_string(),
            Message::ActiveClearFailed(err) => format!("Failed to clear active task: {}", err),
            Message::ActiveRetargetFailed(err) => format!("Failed to move active task pointer: {}", err),

            // === FLUSHER MESSAGES ===
            Message::FlusherStarted(secs) => format!("Background flush every {} seconds", secs),
            Message::FlusherStopped => "Background flush stopped".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskNewTitle => "New title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskUrgent => "Urgent?".to_string(),
            Message::PromptTaskImportant => "Important?".to_string(),
            Message::PromptTaskTags => "Tags (comma separated)".to_string(),
            Message::PromptTagName => "Tag name".to_string(),
            Message::PromptSelectTask => "Select a task".to_string(),
            Message::PromptTaskAction => "What do you want to change?".to_string(),
            Message::PromptBoardName => "Board name".to_string(),
            Message::PromptBoardDir => "Board directory (leave empty for the default)".to_string(),
            Message::PromptFlushSecs => "Flush interval in seconds".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
