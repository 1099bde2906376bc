//! Core library modules for the eisen application.
//!
//! Serves as the main entry point for eisen's library components, providing
//! a centralized access point to the application's core functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Task Model**: Records, identity keys, normalization, snapshots
//! - **Background Work**: Interval-driven flushing for long sessions
//! - **User Interface**: Console table rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eisen::board::Board;
//! use eisen::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = Config::read()?.board.unwrap_or_default();
//! let board = Board::load(&settings.name, settings.resolve_dir())?;
//! let task = board.get_or_create("Write the weekly report")?;
//! board.set_urgent(&task, true);
//! board.flush();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod flusher;
pub mod messages;
pub mod task;
pub mod view;
