//! # Eisen - Eisenhower Task Board
//!
//! A command-line task board that files work by urgency and importance and
//! keeps every task as a small JSON file on disk.
//!
//! ## Features
//!
//! - **Task Management**: Create, update, tag and delete tasks
//! - **Eisenhower Buckets**: Instant lookup by urgency and importance flags
//! - **Tag Index**: Group tasks under normalized tags
//! - **Deferred Persistence**: Edits collect in memory and flush to disk in batches
//! - **Active Task**: One persisted pointer to the task in progress
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eisen::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod board;
pub mod commands;
pub mod libs;
