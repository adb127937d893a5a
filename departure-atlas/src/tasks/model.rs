//! To-do task records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Progress of a task. Serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Status after a click: completed tasks reopen, everything else completes.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        })
    }
}

/// A task on the to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl Task {
    /// A new pending task. Title and description must not be blank.
    pub fn new(
        title: &str,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(DomainError::BlankField("title"));
        }
        if description.is_empty() {
            return Err(DomainError::BlankField("description"));
        }
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            status: TaskStatus::Pending,
        })
    }
}
