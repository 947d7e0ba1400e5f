/// User endpoints
///
/// This module provides the user collection resource:
///
/// - `GET    /v1/users` - All users with their tasks
/// - `POST   /v1/users` - Add a user
/// - `PUT    /v1/users/:user_id` - Update a user
/// - `DELETE /v1/users/:user_id` - Delete a user and all of its tasks

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use todovault_store::models::user::{NewUser, User};
use validator::Validate;

/// User create/update request body
///
/// The identity never travels in the body; creates receive one from the
/// store and updates take it from the path.
#[derive(Debug, Deserialize, Validate)]
pub struct UserPayload {
    /// Login name
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// Opaque password string (hashing is the caller's concern upstream)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Returns every user with its nested task collection
///
/// # Endpoint
///
/// ```text
/// GET /v1/users
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.all_users_with_tasks().await?;
    Ok(Json(users))
}

/// Creates a user
///
/// # Endpoint
///
/// ```text
/// POST /v1/users
/// Content-Type: application/json
///
/// {
///   "username": "ada",
///   "password": "correct horse",
///   "email": "ada@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Store failure
pub async fn add_user(
    State(state): State<AppState>,
    Json(req): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = state
        .store
        .add_user(NewUser {
            username: req.username,
            password: req.password,
            email: req.email,
        })
        .await?;

    Ok(Json(user))
}

/// Overwrites a user's mutable fields
///
/// The path id wins over anything in the body. Updating a user that does
/// not exist is a no-op that still returns the submitted entity.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/users/:user_id
/// ```
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(req): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = User {
        id: user_id,
        username: req.username,
        password: req.password,
        email: req.email,
        tasks: Vec::new(),
    };
    state.store.update_user(&user).await?;

    Ok(Json(user))
}

/// Deletes a user together with all of its tasks
///
/// # Endpoint
///
/// ```text
/// DELETE /v1/users/:user_id
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Store failure (the cascade rolled back)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
