//! HTTP client for the task API.

use serde::{Deserialize, Serialize};
use taskman_core::{Task, TaskPriority, TaskStatus};
use thiserror::Error;

/// A failed API call, carrying the server's `message` when one was returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

fn api_base() -> &'static str {
    option_env!("TASKMAN_API_BASE").unwrap_or("http://localhost:5000/api")
}

/// Body sent when creating a task or saving a full edit. The due date
/// travels as the raw form value so the server owns date parsing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
}

/// Minimal body for flipping a task's completion state.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch {
    pub status: TaskStatus,
}

/// Confirmation returned by the delete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub id: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError {
        message: err.to_string(),
    }
}

/// Turns a non-success response into an [`ApiError`], preferring the
/// server's error body over the bare status line.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let fallback = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message.unwrap_or(fallback),
        Err(_) => fallback,
    };
    Err(ApiError { message })
}

pub async fn get_tasks() -> Result<Vec<Task>, ApiError> {
    let response = reqwest::get(format!("{}/tasks", api_base()))
        .await
        .map_err(transport_error)?;
    check_status(response).await?.json().await.map_err(transport_error)
}

pub async fn create_task(payload: &TaskPayload) -> Result<Task, ApiError> {
    let response = reqwest::Client::new()
        .post(format!("{}/tasks", api_base()))
        .json(payload)
        .send()
        .await
        .map_err(transport_error)?;
    check_status(response).await?.json().await.map_err(transport_error)
}

pub async fn update_task(id: u32, body: &impl Serialize) -> Result<Task, ApiError> {
    let response = reqwest::Client::new()
        .put(format!("{}/tasks/{}", api_base(), id))
        .json(body)
        .send()
        .await
        .map_err(transport_error)?;
    check_status(response).await?.json().await.map_err(transport_error)
}

pub async fn delete_task(id: u32) -> Result<DeleteConfirmation, ApiError> {
    let response = reqwest::Client::new()
        .delete(format!("{}/tasks/{}", api_base(), id))
        .send()
        .await
        .map_err(transport_error)?;
    check_status(response).await?.json().await.map_err(transport_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_in_wire_shape() {
        let payload = TaskPayload {
            title: "Buy milk".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            due_date: Some("2026-09-01".to_string()),
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["dueDate"], "2026-09-01");
    }

    #[test]
    fn status_patch_carries_only_the_status() {
        let patch = StatusPatch {
            status: TaskStatus::Completed,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "completed" }));
    }
}
