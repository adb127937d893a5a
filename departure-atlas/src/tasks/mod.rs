//! To-do list persisted as JSON text under a fixed key.
//!
//! The whole list is stored as one JSON array under [`TASKS_KEY`] and is
//! rewritten on every change.

mod model;
mod store;

pub use model::{Task, TaskStatus};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::DomainError;

/// Key the task list is stored under.
pub const TASKS_KEY: &str = "tasks";

/// Errors from the task list.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A task field failed validation
    #[error("invalid task: {0}")]
    Invalid(#[from] DomainError),

    /// Due date is not a `YYYY-MM-DD` date
    #[error("invalid due date {0:?}: expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// No task at this position
    #[error("no task at index {0}")]
    NoSuchTask(usize),

    /// Stored data could not be parsed
    #[error("corrupt task store: {message}")]
    Corrupt { message: String },

    /// Reading or writing the store failed
    #[error("task store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered task list backed by a key-value store.
#[derive(Debug)]
pub struct TaskList<S> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Load the list from `store`. A missing key is an empty list.
    pub fn load(store: S) -> Result<Self, TaskError> {
        let tasks = match store.get(TASKS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| TaskError::Corrupt {
                message: e.to_string(),
            })?,
            None => Vec::new(),
        };
        Ok(Self { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a pending task and persist.
    ///
    /// The list is only changed once the store accepts it.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<&Task, TaskError> {
        let due_date = NaiveDate::parse_from_str(due_date.trim(), "%Y-%m-%d")
            .map_err(|_| TaskError::InvalidDueDate(due_date.to_string()))?;
        let task = Task::new(title, description, due_date)?;

        let mut updated = self.tasks.clone();
        updated.push(task);
        self.commit(updated)?;
        debug!(count = self.tasks.len(), "task added");

        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Flip the status of the task at `index` and persist.
    pub fn toggle(&mut self, index: usize) -> Result<&Task, TaskError> {
        let mut updated = self.tasks.clone();
        let task = updated
            .get_mut(index)
            .ok_or(TaskError::NoSuchTask(index))?;
        task.status = task.status.toggled();

        self.commit(updated)?;
        Ok(&self.tasks[index])
    }

    /// Persist `updated`, then make it the current list.
    fn commit(&mut self, updated: Vec<Task>) -> Result<(), TaskError> {
        let json = serde_json::to_string(&updated).map_err(|e| TaskError::Corrupt {
            message: e.to_string(),
        })?;
        self.store.set(TASKS_KEY, json)?;
        self.tasks = updated;
        Ok(())
    }
}
