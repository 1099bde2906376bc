//! Task board core.
//!
//! Everything that holds task state lives here, in four layers:
//!
//! - [`index`]: concurrent multi-key lookup over shared record handles
//! - [`files`]: one JSON file per record in the board directory
//! - [`active`]: the persisted active-task pointer
//! - [`board`]: the orchestration layer callers talk to
//!
//! Callers go through [`Board`]; the inner layers carry no knowledge of
//! each other beyond what it passes them.

pub mod active;
pub mod board;
pub mod files;
pub mod index;

pub use active::ActiveTask;
pub use board::{Board, FlushReport};
pub use files::TaskFiles;
pub use index::{TaskIndex, TaskRef};
