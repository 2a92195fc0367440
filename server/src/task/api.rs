use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Deserializer, Serialize};
use taskman_core::{
    NewTask, Task, TaskError, TaskFilter, TaskPatch, TaskPriority, TaskSort, TaskStatus,
    parse_due_date,
};

use crate::task::{TaskService, TaskServiceError};
use crate::web::{ApiError, AppState};

/// Body of POST /api/tasks. Enum-valued fields arrive as plain strings and
/// are parsed at this boundary so an unsupported value becomes a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> Result<NewTask, TaskError> {
        let status = parse_or_default::<TaskStatus>(self.status.as_deref())?;
        let priority = parse_or_default::<TaskPriority>(self.priority.as_deref())?;
        let due_date = self
            .due_date
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(parse_due_date)
            .transpose()?;

        NewTask::new(
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
            status,
            priority,
            due_date,
        )
    }
}

/// Body of PUT /api/tasks/{id}. Every field is independently optional;
/// unknown fields are ignored by deserialization, which is the field
/// whitelist. `dueDate: null` (or an empty string) clears the due date,
/// while an absent `dueDate` leaves it untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    due_date: Option<Option<String>>,
}

/// Keeps the outer `Option` when a field is explicitly `null`, so "absent"
/// and "clear" stay distinguishable.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl UpdateTaskRequest {
    fn into_patch(self) -> Result<TaskPatch, TaskError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<TaskPriority>)
            .transpose()?;
        let due_date = match self.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    Some(None)
                } else {
                    Some(Some(parse_due_date(raw)?))
                }
            }
        };

        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status,
            priority,
            due_date,
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, TaskError>
where
    T: Default + std::str::FromStr<Err = TaskError>,
{
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse(),
        None => Ok(T::default()),
    }
}

/// Query parameters of GET /api/tasks. An unrecognized status or sort value
/// is ignored rather than rejected.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    sort: Option<String>,
}

impl ListTasksQuery {
    fn into_filter(self) -> TaskFilter {
        TaskFilter {
            status: self.status.as_deref().and_then(|raw| raw.parse().ok()),
            search: self.search,
            sort: TaskSort::from_query(self.sort.as_deref()),
        }
    }
}

/// Confirmation payload returned by DELETE /api/tasks/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    message: String,
    id: u32,
}

fn parse_task_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid task id"))
}

/// Renders a body-parse rejection in the same JSON error shape as every
/// other failure, instead of axum's plain-text default.
fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::new(rejection.status(), rejection.body_text())
}

/// Handler for GET /api/tasks.
#[tracing::instrument(skip(state))]
pub async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let service = TaskService::new(&state.db);
    let tasks = service
        .list_tasks(query.into_filter())
        .await
        .map_err(|err| state.api_error(err))?;
    Ok(Json(tasks))
}

/// Handler for POST /api/tasks.
#[tracing::instrument(skip(state))]
pub async fn create_task_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(body) = body.map_err(bad_json)?;
    let input = body
        .into_new_task()
        .map_err(|err| state.api_error(err.into()))?;
    let service = TaskService::new(&state.db);
    let task = service
        .create_task(input)
        .await
        .map_err(|err| state.api_error(err))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for PUT /api/tasks/{id}.
#[tracing::instrument(skip(state))]
pub async fn update_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let Json(body) = body.map_err(bad_json)?;
    let patch = body
        .into_patch()
        .map_err(|err| state.api_error(err.into()))?;
    let service = TaskService::new(&state.db);
    let task = service
        .update_task(id, patch)
        .await
        .map_err(|err| state.api_error(err))?;
    Ok(Json(task))
}

/// Handler for DELETE /api/tasks/{id}.
#[tracing::instrument(skip(state))]
pub async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let id = parse_task_id(&id)?;
    let service = TaskService::new(&state.db);
    let deleted_id = service
        .delete_task(id)
        .await
        .map_err(|err| state.api_error(err))?;
    Ok(Json(DeleteTaskResponse {
        message: "Task deleted".to_string(),
        id: deleted_id,
    }))
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/tasks/{id}",
            axum::routing::put(update_task_handler).delete(delete_task_handler),
        )
        .with_state(state)
}
