/// Task endpoints
///
/// This module provides the per-user task resource:
///
/// - `GET    /v1/users/:user_id/tasks` - Tasks for one user
/// - `POST   /v1/users/:user_id/tasks` - Add a task
/// - `PUT    /v1/users/:user_id/tasks/:task_id` - Update a task
/// - `DELETE /v1/users/:user_id/tasks/:task_id` - Delete a task
///
/// The owning user id always comes from the path, never from the body, so
/// a payload cannot re-home a task under another user.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use todovault_store::models::task::{NewTask, Task};
use validator::Validate;

/// Task create/update request body
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    /// Short description of the task
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Whether the task has been completed
    #[serde(default)]
    pub completed: bool,
}

/// Returns the tasks owned by one user
///
/// # Endpoint
///
/// ```text
/// GET /v1/users/:user_id/tasks
/// ```
///
/// # Errors
///
/// - `404 Not Found`: The user does not exist
/// - `500 Internal Server Error`: Store failure
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.tasks_for_user(user_id).await?;
    Ok(Json(tasks))
}

/// Creates a task for one user
///
/// # Endpoint
///
/// ```text
/// POST /v1/users/:user_id/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "notes": "2%",
///   "completed": false
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: The user does not exist (foreign key rejected)
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Store failure
pub async fn add_task(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = state
        .store
        .add_task(NewTask {
            title: req.title,
            notes: req.notes,
            completed: req.completed,
            user_id,
        })
        .await?;

    Ok(Json(task))
}

/// Overwrites a task's mutable fields
///
/// Matches on both ids; a task id belonging to another user is a no-op
/// that still returns the submitted entity.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/users/:user_id/tasks/:task_id
/// ```
pub async fn update_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(i32, i32)>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = Task {
        id: task_id,
        title: req.title,
        notes: req.notes,
        completed: req.completed,
        user_id,
    };
    state.store.update_task(&task).await?;

    Ok(Json(task))
}

/// Deletes one task
///
/// Deleting a task that does not exist (or belongs to another user)
/// succeeds without effect.
///
/// # Endpoint
///
/// ```text
/// DELETE /v1/users/:user_id/tasks/:task_id
/// ```
pub async fn delete_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    state.store.delete_task(user_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
