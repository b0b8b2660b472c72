//! Read-only projection of the task list for display.

use crate::state::{Filter, TaskList};
use crate::task::TaskId;

pub const HEADING: &str = "To-Do List";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub heading: String,
    pub filter: Filter,
    pub rows: Vec<TaskRow>,
}

impl TaskListView {
    #[must_use]
    pub fn project(list: &TaskList, filter: Filter) -> Self {
        Self {
            heading: HEADING.to_string(),
            filter,
            rows: list
                .filtered(filter)
                .map(|task| TaskRow {
                    id: task.id,
                    title: task.title.clone(),
                    completed: task.completed,
                })
                .collect(),
        }
    }
}

/// Plain-text rendering, one `[x]`/`[ ]` line per row.
#[must_use]
pub fn render_text(view: &TaskListView) -> String {
    let heading = format!("{} ({})\n", view.heading, view.filter);

    if view.rows.is_empty() {
        return heading + "  (no tasks)\n";
    }

    let rows: String = view
        .rows
        .iter()
        .map(|row| {
            let mark = if row.completed { 'x' } else { ' ' };
            format!("  [{mark}] {} {}\n", row.id, row.title)
        })
        .collect();
    heading + &rows
}
