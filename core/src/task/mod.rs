use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors produced while validating task input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),
    #[error("Invalid priority: '{0}'")]
    InvalidPriority(String),
    #[error("Invalid due date: '{0}'")]
    InvalidDueDate(String),
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Returns the opposite status, used by the UI's status toggle.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(TaskError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a task. Declaration order is the sort order: low before
/// medium before high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(TaskError::InvalidPriority(other.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as stored and served over the wire. The id and timestamps are
/// assigned by the store and never set by callers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Case-insensitive substring match against the title. An empty or
    /// whitespace-only needle matches every task.
    ///
    /// This is the client-side search; the server additionally matches
    /// descriptions.
    pub fn title_matches(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        needle.is_empty() || self.title.to_lowercase().contains(&needle)
    }

    /// Whether the task's due date has passed without it being completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status != TaskStatus::Completed,
            None => false,
        }
    }
}

/// Validated input for creating a task. Construction trims the text fields
/// and rejects an empty title.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(
        title: &str,
        description: &str,
        status: TaskStatus,
        priority: TaskPriority,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
            status,
            priority,
            due_date,
        })
    }
}

/// A partial update. Only fields that are present are applied; `due_date`
/// distinguishes "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Trims the string fields and re-validates the patch, rejecting an
    /// empty title when the patch contains one.
    pub fn normalized(mut self) -> Result<Self, TaskError> {
        if let Some(title) = self.title.take() {
            let title = title.trim();
            if title.is_empty() {
                return Err(TaskError::EmptyTitle);
            }
            self.title = Some(title.to_string());
        }
        if let Some(description) = self.description.take() {
            self.description = Some(description.trim().to_string());
        }
        Ok(self)
    }
}

/// Query-time constraints for listing tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
    pub sort: TaskSort,
}

/// Sort selector for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    /// Newest first.
    #[default]
    CreatedAt,
    /// Earliest due date first, tasks without a due date last.
    DueDate,
    /// Low before medium before high.
    Priority,
}

impl TaskSort {
    /// Maps a `sort` query parameter to a selector. Unknown or absent
    /// values fall back to the creation-time default rather than failing.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("dueDate") => TaskSort::DueDate,
            Some("priority") => TaskSort::Priority,
            _ => TaskSort::CreatedAt,
        }
    }
}

/// Parses a due date supplied by a client. Accepts full RFC 3339 date-times
/// as well as plain `YYYY-MM-DD` dates (interpreted as midnight UTC), which
/// is what a date input control submits.
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>, TaskError> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| {
            date.and_hms_opt(0, 0, 0)
                .expect("midnight is a valid time")
                .and_utc()
        })
        .map_err(|_| TaskError::InvalidDueDate(value.to_string()))
}
