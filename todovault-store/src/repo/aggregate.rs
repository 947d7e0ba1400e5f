/// Flattened-join aggregation
///
/// The aggregate read produces one flat row per task, or exactly one row
/// with NULL task columns for a user who has none. This module rebuilds
/// the nested user→tasks graph from that flat result: a [`JoinedRow`] is
/// one decoded row of the join, and [`UserGraphBuilder`] folds rows into
/// an ordered, duplicate-free user list.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::models::{Task, User};

/// One row of the users-to-tasks left join.
///
/// Columns are read positionally: user columns first (0..4), task columns
/// second (4..9). Every task-side column is nullable because a user
/// without tasks joins against nothing; the user-side strings are read as
/// nullable too and default to empty.
pub(crate) struct JoinedRow {
    pub user_id: i32,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub task_id: Option<i32>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
    pub task_user_id: Option<i32>,
}

impl JoinedRow {
    /// Decodes one row of `SELECT users.*, tasks.* FROM users LEFT JOIN tasks ...`.
    pub(crate) fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get(0)?,
            username: row.try_get(1)?,
            password: row.try_get(2)?,
            email: row.try_get(3)?,
            task_id: row.try_get(4)?,
            title: row.try_get(5)?,
            notes: row.try_get(6)?,
            completed: row.try_get(7)?,
            task_user_id: row.try_get(8)?,
        })
    }
}

/// Incremental builder for the user→tasks graph.
///
/// Users are appended in the order they are first seen; a lookup from user
/// id to position guarantees each user is materialized exactly once, so
/// rows belonging to the same user do not have to arrive contiguously.
pub(crate) struct UserGraphBuilder {
    users: Vec<User>,
    seen: HashMap<i32, usize>,
}

impl UserGraphBuilder {
    pub(crate) fn new() -> Self {
        Self {
            users: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Folds one joined row into the graph.
    pub(crate) fn push(&mut self, row: JoinedRow) {
        let slot = match self.seen.get(&row.user_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.users.len();
                self.users.push(User {
                    id: row.user_id,
                    username: row.username.unwrap_or_default(),
                    password: row.password.unwrap_or_default(),
                    email: row.email.unwrap_or_default(),
                    tasks: Vec::new(),
                });
                self.seen.insert(row.user_id, slot);
                slot
            }
        };

        // A NULL task id marks a user who joined against nothing; there is
        // no task row to attach.
        let Some(task_id) = row.task_id else {
            return;
        };

        self.users[slot].tasks.push(Task {
            id: task_id,
            title: row.title.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
            completed: row.completed.unwrap_or_default(),
            user_id: row.task_user_id.unwrap_or_default(),
        });
    }

    /// Consumes the builder, returning users in first-seen order.
    pub(crate) fn finish(self) -> Vec<User> {
        self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_row(user_id: i32, username: &str) -> JoinedRow {
        JoinedRow {
            user_id,
            username: Some(username.to_string()),
            password: Some("pw".to_string()),
            email: Some(format!("{}@example.com", username)),
            task_id: None,
            title: None,
            notes: None,
            completed: None,
            task_user_id: None,
        }
    }

    fn task_row(user_id: i32, username: &str, task_id: i32, title: &str) -> JoinedRow {
        JoinedRow {
            task_id: Some(task_id),
            title: Some(title.to_string()),
            notes: Some(String::new()),
            completed: Some(false),
            task_user_id: Some(user_id),
            ..user_row(user_id, username)
        }
    }

    fn build(rows: Vec<JoinedRow>) -> Vec<User> {
        let mut builder = UserGraphBuilder::new();
        for row in rows {
            builder.push(row);
        }
        builder.finish()
    }

    #[test]
    fn test_user_without_tasks_gets_empty_collection() {
        let users = build(vec![user_row(1, "ada")]);

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].username, "ada");
        assert!(users[0].tasks.is_empty());
    }

    #[test]
    fn test_tasks_attach_to_their_owner() {
        let users = build(vec![
            user_row(1, "ada"),
            task_row(2, "bob", 10, "Buy milk"),
            task_row(2, "bob", 11, "Walk dog"),
        ]);

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert!(users[0].tasks.is_empty());
        assert_eq!(users[1].id, 2);
        assert_eq!(users[1].tasks.len(), 2);
        assert_eq!(users[1].tasks[0].title, "Buy milk");
        assert_eq!(users[1].tasks[1].title, "Walk dog");
        assert_eq!(users[1].tasks[0].user_id, 2);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let users = build(vec![
            task_row(5, "eve", 1, "a"),
            task_row(3, "bob", 2, "b"),
            task_row(9, "ada", 3, "c"),
        ]);

        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_rows_need_not_be_grouped_by_user() {
        let users = build(vec![
            task_row(1, "ada", 10, "first"),
            task_row(2, "bob", 20, "other"),
            task_row(1, "ada", 11, "second"),
        ]);

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].tasks.len(), 2);
        assert_eq!(users[0].tasks[1].title, "second");
        assert_eq!(users[1].tasks.len(), 1);
    }

    #[test]
    fn test_no_duplicate_user_entries() {
        let users = build(vec![
            task_row(1, "ada", 10, "a"),
            task_row(1, "ada", 11, "b"),
            task_row(1, "ada", 12, "c"),
        ]);

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].tasks.len(), 3);
    }

    #[test]
    fn test_null_user_strings_default_to_empty() {
        let users = build(vec![JoinedRow {
            user_id: 1,
            username: None,
            password: None,
            email: None,
            task_id: None,
            title: None,
            notes: None,
            completed: None,
            task_user_id: None,
        }]);

        assert_eq!(users[0].username, "");
        assert_eq!(users[0].password, "");
        assert_eq!(users[0].email, "");
    }

    #[test]
    fn test_null_task_fields_default_when_id_present() {
        let users = build(vec![JoinedRow {
            task_id: Some(10),
            title: None,
            notes: None,
            completed: None,
            task_user_id: None,
            ..user_row(1, "ada")
        }]);

        let task = &users[0].tasks[0];
        assert_eq!(task.id, 10);
        assert_eq!(task.title, "");
        assert_eq!(task.notes, "");
        assert!(!task.completed);
        assert_eq!(task.user_id, 0);
    }

    #[test]
    fn test_two_user_scenario() {
        // A has no tasks and contributes one all-NULL-task row; B
        // contributes one row per task.
        let users = build(vec![
            user_row(1, "a"),
            task_row(2, "b", 1, "Buy milk"),
            task_row(2, "b", 2, "Walk dog"),
        ]);

        assert_eq!(users.len(), 2);
        assert_eq!((users[0].id, users[0].tasks.len()), (1, 0));
        assert_eq!((users[1].id, users[1].tasks.len()), (2, 2));
        assert_eq!(users[1].tasks[0].id, 1);
        assert_eq!(users[1].tasks[1].id, 2);
    }
}
