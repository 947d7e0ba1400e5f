/// Domain models for todovault
///
/// This module contains the two domain entities and their insert inputs.
///
/// # Models
///
/// - `user`: A user account owning a collection of tasks
/// - `task`: A single to-do item belonging to one user
///
/// # Example
///
/// ```
/// use todovault_store::models::user::NewUser;
///
/// let new_user = NewUser {
///     username: "ada".to_string(),
///     password: "correct horse".to_string(),
///     email: "ada@example.com".to_string(),
/// };
/// ```

pub mod task;
pub mod user;

pub use task::{NewTask, Task};
pub use user::{NewUser, User};
