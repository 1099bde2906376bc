//! Board summary command.
//!
//! Breaks the board down into the four Eisenhower quadrants by combining
//! flag lookups, plus tag and unsaved-change counts.

use crate::libs::messages::Message;
use crate::libs::view::{Summary, View};
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {}

pub fn cmd(_args: SumArgs) -> Result<()> {
    let board = super::open_board()?;
    if board.is_empty() {
        msg_info!(Message::NoTasksOnBoard);
        return Ok(());
    }

    let mut summary = Summary {
        board: board.name().to_string(),
        total: board.len(),
        do_first: 0,
        schedule: 0,
        delegate: 0,
        eliminate: 0,
        tags: board.tags().len(),
        pending: board.pending().len(),
    };
    for task in board.by_urgency(true) {
        let record = task.read();
        if record.important {
            summary.do_first += 1;
        } else {
            summary.delegate += 1;
        }
    }
    for task in board.by_urgency(false) {
        let record = task.read();
        if record.important {
            summary.schedule += 1;
        } else {
            summary.eliminate += 1;
        }
    }

    View::summary(&summary);
    Ok(())
}
