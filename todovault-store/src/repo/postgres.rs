/// Postgres-backed implementation of [`UserStore`]
///
/// Every operation acquires one connection from the pool, runs its
/// statements on that connection with bound parameters, and releases the
/// connection when the operation returns. The only multi-statement
/// operation, `delete_user`, wraps its two deletes in a transaction;
/// everything else is a single statement (the inserts retrieve their
/// generated identity through `RETURNING`, in the same statement).

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Connection, PgPool};
use tracing::debug;

use super::aggregate::{JoinedRow, UserGraphBuilder};
use super::UserStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewTask, NewUser, Task, User};

/// Aggregate read; consumed column-positionally, user columns then task
/// columns, one row per task and one all-NULL-task row per taskless user.
const SELECT_USERS_WITH_TASKS: &str = "\
    SELECT users.*, tasks.* \
    FROM users \
    LEFT JOIN tasks ON users.id = tasks.user_id";

const SELECT_TASKS_FOR_USER: &str = "\
    SELECT id, title, notes, completed, user_id \
    FROM tasks \
    WHERE user_id = $1";

/// The Postgres user store
///
/// Cheap to clone; the pool is internally reference-counted.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a store drawing connections from `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn all_users_with_tasks(&self) -> StoreResult<Vec<User>> {
        let wrap = StoreError::op("list users and their tasks");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let mut builder = UserGraphBuilder::new();
        let mut rows = sqlx::query(SELECT_USERS_WITH_TASKS).fetch(&mut *conn);
        while let Some(row) = rows.try_next().await.map_err(&wrap)? {
            builder.push(JoinedRow::decode(&row).map_err(&wrap)?);
        }

        Ok(builder.finish())
    }

    async fn tasks_for_user(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        let wrap = StoreError::op("list tasks for user");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(&wrap)?;

        if user_count == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }

        // The check and the fetch are not transactionally linked; a user
        // deleted between the two statements yields an empty task list
        // rather than UserNotFound.
        let tasks = sqlx::query_as::<_, Task>(SELECT_TASKS_FOR_USER)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(&wrap)?;

        Ok(tasks)
    }

    async fn add_user(&self, user: NewUser) -> StoreResult<User> {
        let wrap = StoreError::op("add user");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO users (username, password, email) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .fetch_one(&mut *conn)
        .await
        .map_err(&wrap)?;

        debug!(user_id = id, "inserted user");

        Ok(User {
            id,
            username: user.username,
            password: user.password,
            email: user.email,
            tasks: Vec::new(),
        })
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let wrap = StoreError::op("update user");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let result = sqlx::query(
            "UPDATE users SET username = $1, password = $2, email = $3 WHERE id = $4",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(user.id)
        .execute(&mut *conn)
        .await
        .map_err(&wrap)?;

        if result.rows_affected() == 0 {
            debug!(user_id = user.id, "update matched no user row");
        }

        Ok(())
    }

    async fn delete_user(&self, user_id: i32) -> StoreResult<()> {
        let wrap = StoreError::op("delete user and tasks");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        // Task rows must go first: the foreign key has no ON DELETE
        // action, so deleting the user row while tasks still reference it
        // would fail. Dropping the transaction before commit rolls both
        // deletes back.
        let mut tx = conn.begin().await.map_err(&wrap)?;

        sqlx::query("DELETE FROM tasks WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(&wrap)?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(&wrap)?;

        tx.commit().await.map_err(&wrap)?;

        debug!(user_id, "deleted user and owned tasks");
        Ok(())
    }

    async fn add_task(&self, task: NewTask) -> StoreResult<Task> {
        let wrap = StoreError::op("add task");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO tasks (title, notes, completed, user_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&task.title)
        .bind(&task.notes)
        .bind(task.completed)
        .bind(task.user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(&wrap)?;

        debug!(task_id = id, user_id = task.user_id, "inserted task");

        Ok(Task {
            id,
            title: task.title,
            notes: task.notes,
            completed: task.completed,
            user_id: task.user_id,
        })
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let wrap = StoreError::op("update task");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let result = sqlx::query(
            "UPDATE tasks SET title = $1, notes = $2, completed = $3 \
             WHERE id = $4 AND user_id = $5",
        )
        .bind(&task.title)
        .bind(&task.notes)
        .bind(task.completed)
        .bind(task.id)
        .bind(task.user_id)
        .execute(&mut *conn)
        .await
        .map_err(&wrap)?;

        if result.rows_affected() == 0 {
            debug!(
                task_id = task.id,
                user_id = task.user_id,
                "update matched no task row"
            );
        }

        Ok(())
    }

    async fn delete_task(&self, user_id: i32, task_id: i32) -> StoreResult<()> {
        let wrap = StoreError::op("delete task");
        let mut conn = self.pool.acquire().await.map_err(&wrap)?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(&wrap)?;

        if result.rows_affected() == 0 {
            debug!(task_id, user_id, "delete matched no task row");
        }

        Ok(())
    }
}
