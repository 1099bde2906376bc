//! Terminal table rendering.

use crate::libs::task::TaskView;
use prettytable::{row, Table};

/// Quadrant breakdown of a board, ready for display.
pub struct Summary {
    pub board: String,
    pub total: usize,
    pub do_first: usize,
    pub schedule: usize,
    pub delegate: usize,
    pub eliminate: usize,
    pub tags: usize,
    pub pending: usize,
}

pub struct View {}

impl View {
    /// Prints the board's records as one table row per task.
    pub fn tasks(tasks: &[TaskView]) {
        let mut table = Table::new();

        table.add_row(row!["TITLE", "DESCRIPTION", "URGENT", "IMPORTANT", "TAGS"]);
        for task in tasks {
            table.add_row(row![
                task.title,
                task.description,
                flag(task.is_urgent),
                flag(task.is_important),
                task.tags.join(", ")
            ]);
        }
        table.printstd();
    }

    /// Prints a single record in a field-per-row layout.
    pub fn task(task: &TaskView) {
        let mut table = Table::new();

        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description]);
        table.add_row(row!["URGENT", flag(task.is_urgent)]);
        table.add_row(row!["IMPORTANT", flag(task.is_important)]);
        table.add_row(row!["TAGS", task.tags.join(", ")]);
        table.printstd();
    }

    /// Prints the Eisenhower quadrant summary for a board.
    pub fn summary(summary: &Summary) {
        let mut table = Table::new();

        table.add_row(row!["BOARD", summary.board]);
        table.add_row(row!["TASKS", summary.total]);
        table.add_row(row!["DO FIRST (urgent + important)", summary.do_first]);
        table.add_row(row!["SCHEDULE (important)", summary.schedule]);
        table.add_row(row!["DELEGATE (urgent)", summary.delegate]);
        table.add_row(row!["ELIMINATE (neither)", summary.eliminate]);
        table.add_row(row!["TAGS IN USE", summary.tags]);
        table.add_row(row!["UNSAVED CHANGES", summary.pending]);
        table.printstd();
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
