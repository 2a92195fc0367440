use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, EntityTrait, Order, QueryFilter,
    QueryOrder,
};
use taskman_core::{NewTask, Task, TaskError, TaskFilter, TaskPatch, TaskSort};

use crate::entities::{sea_orm_active_enums, task};

pub mod api;

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents invalid task input, such as an empty title or an
    /// unsupported status or priority value.
    #[error("{0}")]
    Validation(#[from] TaskError),
    /// Represents a task not found error.
    #[error("Task not found")]
    TaskNotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task {
            id: model.id as u32,
            title: model.title,
            description: model.description,
            status: status_from_entity(model.status),
            priority: priority_from_entity(model.priority),
            due_date: model.due_date.map(|date| date.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService {
        TaskService { db }
    }

    /// Persists a new task. The store assigns the id and both timestamps.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, input: NewTask) -> Result<Task, TaskServiceError> {
        let now = Utc::now();
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            status: ActiveValue::Set(status_to_entity(input.status)),
            priority: ActiveValue::Set(priority_to_entity(input.priority)),
            due_date: ActiveValue::Set(input.due_date.map(Into::into)),
            created_at: ActiveValue::Set(now.into()),
            updated_at: ActiveValue::Set(now.into()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Retrieves tasks matching the filter.
    ///
    /// The status filter restricts by exact match; the search text matches
    /// title or description case-insensitively. Default order is newest
    /// first; sorting by due date puts tasks without one last.
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskServiceError> {
        let mut query = task::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(task::Column::Status.eq(status_to_entity(status)));
        }

        if let Some(search) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            let pattern = format!("%{}%", escape_like(search));
            query = query.filter(
                Condition::any()
                    .add(Expr::col((task::Entity, task::Column::Title)).ilike(pattern.clone()))
                    .add(Expr::col((task::Entity, task::Column::Description)).ilike(pattern)),
            );
        }

        query = match filter.sort {
            TaskSort::CreatedAt => query.order_by_desc(task::Column::CreatedAt),
            TaskSort::DueDate => query
                .order_by_with_nulls(task::Column::DueDate, Order::Asc, NullOrdering::Last)
                .order_by_desc(task::Column::CreatedAt),
            TaskSort::Priority => query
                .order_by_asc(task::Column::Priority)
                .order_by_desc(task::Column::CreatedAt),
        };

        let tasks = query
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Applies a partial update to a task by its ID.
    ///
    /// Only fields present in the patch are written; the patch is trimmed
    /// and re-validated first. `updated_at` is refreshed on every write.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: i32, patch: TaskPatch) -> Result<Task, TaskServiceError> {
        let patch = patch.normalized()?;

        let task_to_update = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let mut active_model: task::ActiveModel = task_to_update.into();
        if let Some(title) = patch.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = patch.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(status) = patch.status {
            active_model.status = ActiveValue::Set(status_to_entity(status));
        }
        if let Some(priority) = patch.priority {
            active_model.priority = ActiveValue::Set(priority_to_entity(priority));
        }
        if let Some(due_date) = patch.due_date {
            active_model.due_date = ActiveValue::Set(due_date.map(Into::into));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now().into());

        let updated_model = active_model.update(self.db).await?;
        Ok(Task::from(updated_model))
    }

    /// Permanently deletes a task by its ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted task's id if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<u32, TaskServiceError> {
        let task_to_delete = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(task_to_delete.id as u32)
    }
}

fn status_to_entity(status: taskman_core::TaskStatus) -> sea_orm_active_enums::TaskStatus {
    match status {
        taskman_core::TaskStatus::Pending => sea_orm_active_enums::TaskStatus::Pending,
        taskman_core::TaskStatus::Completed => sea_orm_active_enums::TaskStatus::Completed,
    }
}

fn status_from_entity(status: sea_orm_active_enums::TaskStatus) -> taskman_core::TaskStatus {
    match status {
        sea_orm_active_enums::TaskStatus::Pending => taskman_core::TaskStatus::Pending,
        sea_orm_active_enums::TaskStatus::Completed => taskman_core::TaskStatus::Completed,
    }
}

fn priority_to_entity(priority: taskman_core::TaskPriority) -> sea_orm_active_enums::TaskPriority {
    match priority {
        taskman_core::TaskPriority::Low => sea_orm_active_enums::TaskPriority::Low,
        taskman_core::TaskPriority::Medium => sea_orm_active_enums::TaskPriority::Medium,
        taskman_core::TaskPriority::High => sea_orm_active_enums::TaskPriority::High,
    }
}

fn priority_from_entity(priority: sea_orm_active_enums::TaskPriority) -> taskman_core::TaskPriority {
    match priority {
        sea_orm_active_enums::TaskPriority::Low => taskman_core::TaskPriority::Low,
        sea_orm_active_enums::TaskPriority::Medium => taskman_core::TaskPriority::Medium,
        sea_orm_active_enums::TaskPriority::High => taskman_core::TaskPriority::High,
    }
}

/// Escapes LIKE metacharacters so the search text matches literally.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
