//! Client-side filtering of the loaded task list.

use taskman_core::{Task, TaskStatus};

/// Which statuses the list should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == status,
        }
    }

    /// Maps a filter chip value back to a filter. Anything unrecognized
    /// falls back to showing everything.
    pub fn from_value(value: &str) -> Self {
        match value.parse::<TaskStatus>() {
            Ok(status) => StatusFilter::Only(status),
            Err(_) => StatusFilter::All,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Current state of the filter bar. The search box matches titles only;
/// the server-side search is broader but this list is already in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: StatusFilter,
    pub search: String,
}

impl TaskFilters {
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.status.matches(task) && task.title_matches(&self.search))
            .cloned()
            .collect()
    }
}
