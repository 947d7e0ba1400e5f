/// Repository facade for users and their tasks
///
/// [`UserStore`] is the abstract capability set callers depend on;
/// [`PgUserStore`] is the single concrete implementation, bound to
/// PostgreSQL. Each operation acquires its own connection from the pool
/// and releases it when the operation returns, on every exit path.
///
/// # Modules
///
/// - `aggregate`: Flattened-join to user→tasks graph reconstruction
/// - `postgres`: The Postgres-backed [`UserStore`] implementation
///
/// # Example
///
/// ```no_run
/// use todovault_store::db::pool::{create_pool, DatabaseConfig};
/// use todovault_store::models::user::NewUser;
/// use todovault_store::repo::{PgUserStore, UserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let store = PgUserStore::new(pool);
///
/// let user = store
///     .add_user(NewUser {
///         username: "ada".to_string(),
///         password: "correct horse".to_string(),
///         email: "ada@example.com".to_string(),
///     })
///     .await?;
///
/// let graph = store.all_users_with_tasks().await?;
/// println!("{} users", graph.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewTask, NewUser, Task, User};

mod aggregate;
mod postgres;

pub use postgres::PgUserStore;

/// Persistence operations for users and their tasks
///
/// Callers hold this trait (usually as `Arc<dyn UserStore>`) rather than
/// the concrete store, so the storage binding stays swappable.
///
/// Write operations that target a single row (`update_user`,
/// `update_task`, `delete_task`) succeed without error when no row
/// matches; see the per-method docs.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns every user together with its tasks.
    ///
    /// Users appear in the order the underlying join first produced them,
    /// each exactly once. A user with no tasks is returned with an empty
    /// task collection.
    async fn all_users_with_tasks(&self) -> StoreResult<Vec<User>>;

    /// Returns the tasks owned by one user.
    ///
    /// Fails with [`crate::error::StoreError::UserNotFound`] when no user
    /// row has the given id; in that case no task query is issued. Task
    /// order is the store's natural return order.
    async fn tasks_for_user(&self, user_id: i32) -> StoreResult<Vec<Task>>;

    /// Inserts a new user and returns it with its database-assigned id.
    async fn add_user(&self, user: NewUser) -> StoreResult<User>;

    /// Overwrites the mutable fields of the user row matching `user.id`.
    ///
    /// Completes without error when no row matches.
    async fn update_user(&self, user: &User) -> StoreResult<()>;

    /// Deletes a user and all of its tasks as one atomic unit.
    ///
    /// Both deletes run in a single transaction: on any failure the whole
    /// cascade rolls back and no other operation observes a partial state.
    async fn delete_user(&self, user_id: i32) -> StoreResult<()>;

    /// Inserts a new task and returns it with its database-assigned id.
    ///
    /// Fails with a constraint error when `task.user_id` references no
    /// existing user.
    async fn add_task(&self, task: NewTask) -> StoreResult<Task>;

    /// Overwrites the mutable fields of the task row matching both
    /// `task.id` and `task.user_id`.
    ///
    /// Matching on the owner id prevents cross-user updates through a
    /// mismatched task id. Completes without error when no row matches.
    async fn update_task(&self, task: &Task) -> StoreResult<()>;

    /// Deletes the task row matching both `task_id` and `user_id`.
    ///
    /// Completes without error whether or not a row was removed.
    async fn delete_task(&self, user_id: i32, task_id: i32) -> StoreResult<()>;
}
