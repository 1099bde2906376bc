//! Task management commands.
//!
//! Subcommands cover the whole record lifecycle: listing, point display,
//! batch updates via flags, an interactive editor and deletion. Running
//! `eisen task` with no subcommand starts the creation wizard.
//!
//! Every mutating subcommand flushes the board before returning, so changes
//! hit disk even though the board itself defers saving. The interactive
//! editor additionally keeps a background [`Flusher`] alive for the session.

use crate::board::Board;
use crate::libs::flusher::Flusher;
use crate::libs::messages::Message;
use crate::libs::task::{normalize_tag, TaskKey, TaskPatch, TaskView, DEFAULT_DESCRIPTION};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks on the board
    List {
        /// Only show tasks carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show a single task
    Show {
        /// Task title
        title: String,
    },
    /// Create or update a task
    Set {
        /// Task title, created when missing
        title: String,
        /// New title
        #[arg(long)]
        rename: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Urgency flag
        #[arg(short, long)]
        urgent: Option<bool>,
        /// Importance flag
        #[arg(short, long)]
        important: Option<bool>,
        /// Replace the tag set
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Edit a task interactively
    Edit {
        /// Task title to edit, selected from a list when omitted
        title: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task title
        title: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        Some(TaskCommand::List { tag }) => handle_list(tag),
        Some(TaskCommand::Show { title }) => handle_show(title),
        Some(TaskCommand::Set {
            title,
            rename,
            description,
            urgent,
            important,
            tags,
        }) => {
            let patch = TaskPatch {
                rename,
                description,
                urgent,
                important,
                tags,
            };
            handle_set(title, patch)
        }
        Some(TaskCommand::Edit { title }) => handle_edit(title),
        Some(TaskCommand::Delete { title, force }) => handle_delete(title, force),
        None => handle_create(),
    }
}

fn handle_list(tag: Option<String>) -> Result<()> {
    let board = super::open_board()?;
    let tasks = match tag {
        Some(raw) => {
            let tag = normalize_tag(&raw)?;
            let mut views: Vec<TaskView> = board.by_tag(&tag).iter().map(|task| task.view()).collect();
            views.sort_by(|a, b| a.title.cmp(&b.title));
            views
        }
        None => board.snapshot(),
    };
    if tasks.is_empty() {
        msg_info!(Message::NoTasksOnBoard);
        return Ok(());
    }
    View::tasks(&tasks);
    Ok(())
}

fn handle_show(title: String) -> Result<()> {
    match super::open_board()?.find(&title)? {
        Some(task) => View::task(&task.view()),
        None => msg_error!(Message::TaskNotFound(title)),
    }
    Ok(())
}

fn handle_set(title: String, patch: TaskPatch) -> Result<()> {
    let board = super::open_board()?;
    let mut existed = board.find(&title)?.is_some();
    if let (false, Some(target)) = (existed, &patch.rename) {
        // the title may already carry a completed rename
        existed = board.find(target)?.is_some();
    }
    let task = board.update(&title, &patch)?;
    let view = task.view();
    if existed {
        msg_success!(Message::TaskUpdated(view.title.clone()));
    } else {
        msg_success!(Message::TaskCreated(view.title.clone()));
    }
    View::task(&view);
    flush_quietly(&board);
    Ok(())
}

fn handle_create() -> Result<()> {
    let board = super::open_board()?;

    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            match TaskKey::parse(input) {
                Ok(_) => Ok(()),
                Err(_) => Err("Title needs at least one letter or digit"),
            }
        })
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(DEFAULT_DESCRIPTION.to_string())
        .interact_text()?;
    let urgent = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskUrgent.to_string())
        .default(false)
        .interact()?;
    let important = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskImportant.to_string())
        .default(false)
        .interact()?;
    let tags: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTags.to_string())
        .allow_empty(true)
        .interact_text()?;

    let patch = TaskPatch {
        rename: None,
        description: Some(description),
        urgent: Some(urgent),
        important: Some(important),
        tags: parse_tag_list(&tags),
    };
    let task = board.update(&title, &patch)?;
    let view = task.view();
    msg_success!(Message::TaskCreated(view.title.clone()));
    View::task(&view);
    flush_quietly(&board);
    Ok(())
}

fn handle_edit(title: Option<String>) -> Result<()> {
    let settings = super::board_settings()?;
    let board = Arc::new(Board::load(&settings.name, settings.resolve_dir())?);

    let task = match title {
        Some(title) => match board.find(&title)? {
            Some(task) => task,
            None => {
                msg_error!(Message::TaskNotFound(title));
                return Ok(());
            }
        },
        None => {
            let views = board.snapshot();
            if views.is_empty() {
                msg_info!(Message::NoTasksOnBoard);
                return Ok(());
            }
            let titles: Vec<String> = views.iter().map(|view| view.title.clone()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSelectTask.to_string())
                .items(&titles)
                .interact()?;
            board.get_or_create(&titles[selection])?
        }
    };

    // Keep edits reaching disk while the user works through the menu.
    let flusher = Flusher::spawn(board.clone(), Duration::from_secs(settings.flush_secs));
    msg_print!(Message::EditingTask(task.read().title.clone()), true);

    let options = vec![
        "Rename",
        "Edit description",
        "Toggle urgency",
        "Toggle importance",
        "Add tag",
        "Remove tag",
        "Show",
        "Done",
    ];
    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskAction.to_string())
            .items(&options)
            .default(0)
            .interact()?;
        let changed = match selection {
            0 => {
                let current = task.read().title.clone();
                let new_title: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTaskNewTitle.to_string())
                    .default(current)
                    .validate_with(|input: &String| -> Result<(), &str> {
                        match TaskKey::parse(input) {
                            Ok(_) => Ok(()),
                            Err(_) => Err("Title needs at least one letter or digit"),
                        }
                    })
                    .interact_text()?;
                board.rename(&task, &new_title)?
            }
            1 => {
                let current = task.read().description.clone();
                let description: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTaskDescription.to_string())
                    .default(current)
                    .interact_text()?;
                board.set_description(&task, &description)
            }
            2 => {
                let urgent = !task.read().urgent;
                board.set_urgent(&task, urgent)
            }
            3 => {
                let important = !task.read().important;
                board.set_important(&task, important)
            }
            4 => {
                let tag: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTagName.to_string())
                    .validate_with(|input: &String| -> Result<(), &str> {
                        match normalize_tag(input) {
                            Ok(_) => Ok(()),
                            Err(_) => Err("Tag needs at least one letter or digit"),
                        }
                    })
                    .interact_text()?;
                board.add_tag(&task, &tag)?
            }
            5 => {
                let tags: Vec<String> = task.read().tags.iter().cloned().collect();
                if tags.is_empty() {
                    msg_info!(Message::NoChangesDetected);
                    continue;
                }
                let picked = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTagName.to_string())
                    .items(&tags)
                    .interact()?;
                board.remove_tag(&task, &tags[picked])?
            }
            6 => {
                View::task(&task.view());
                continue;
            }
            _ => break,
        };
        if !changed {
            msg_info!(Message::NoChangesDetected);
        }
    }

    flusher.stop();
    msg_success!(Message::TaskEditingCompleted);
    Ok(())
}

fn handle_delete(title: String, force: bool) -> Result<()> {
    let board = super::open_board()?;
    let task = match board.find(&title)? {
        Some(task) => task,
        None => {
            msg_error!(Message::TaskNotFound(title));
            return Ok(());
        }
    };
    let task_title = task.read().title.clone();

    if !force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task_title.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    board.delete(&task_title)?;
    flush_quietly(&board);
    msg_success!(Message::TaskDeleted(task_title));
    Ok(())
}

/// Flushes the board, surfacing only failures.
fn flush_quietly(board: &Board) {
    let report = board.flush();
    if report.failed > 0 {
        msg_warning!(Message::FlushFailures(report.failed));
    }
}

/// Splits comma separated wizard input into a tag list, `None` when blank.
fn parse_tag_list(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_string).collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}
