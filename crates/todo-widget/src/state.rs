//! Owned task collection and its single update function.
//!
//! Every change goes through [`TaskList::apply`], which reports whether the
//! collection actually changed and bumps [`TaskList::version`] when it did.
//! Filtering is a read-only projection and never touches the collection.

use std::str::FromStr;

use crate::error::WidgetError;
use crate::task::{Task, TaskId};

// =============================================================================
// Filter
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = WidgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "pending" | "active" => Ok(Self::Pending),
            _ => Err(WidgetError::InvalidFilter(value.to_string())),
        }
    }
}

// =============================================================================
// Action
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert a new pending task at the front. Blank titles are ignored.
    Add { id: TaskId, title: String },
    Toggle(TaskId),
    Delete(TaskId),
    /// Adopt a whole collection (initial load).
    Replace(Vec<Task>),
}

// =============================================================================
// TaskList
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    version: u64,
}

impl TaskList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn filtered(&self, filter: Filter) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    /// Applies `action`, returning `true` when the collection changed.
    pub fn apply(&mut self, action: Action) -> bool {
        let changed = match action {
            Action::Add { id, title } => {
                if title.trim().is_empty() {
                    false
                } else {
                    self.tasks.insert(0, Task::new(id, title));
                    true
                }
            }
            Action::Toggle(id) => match self.tasks.iter_mut().find(|task| task.id == id) {
                Some(task) => {
                    task.completed = !task.completed;
                    true
                }
                None => false,
            },
            Action::Delete(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|task| task.id != id);
                self.tasks.len() != before
            }
            Action::Replace(tasks) => {
                self.tasks = tasks;
                true
            }
        };

        if changed {
            self.version += 1;
        }
        changed
    }
}

// =============================================================================
// Tests
// =============================================================================
