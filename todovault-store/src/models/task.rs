/// Task model
///
/// A single to-do item. Every task references its owning user; a task row
/// is only reachable through that owner, and deleting the owner removes
/// its tasks in the same transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     notes TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id INTEGER NOT NULL REFERENCES users(id)
/// );
/// ```

use serde::{Deserialize, Serialize};

/// A to-do item owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Database-assigned identity
    pub id: i32,

    /// Short description of the task
    pub title: String,

    /// Free-form notes
    pub notes: String,

    /// Whether the task has been completed
    pub completed: bool,

    /// Identity of the owning user
    pub user_id: i32,
}

/// Input for inserting a new task
///
/// Carries every column except the identity, which the database assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Short description of the task
    pub title: String,

    /// Free-form notes
    pub notes: String,

    /// Whether the task has been completed
    pub completed: bool,

    /// Identity of the owning user
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_field_names_survive_serialization() {
        let task = Task {
            id: 7,
            title: "Buy milk".to_string(),
            notes: "2%".to_string(),
            completed: false,
            user_id: 1,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["user_id"], 1);
    }
}
