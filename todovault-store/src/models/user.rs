/// User model
///
/// A user owns an ordered collection of tasks. The identity is assigned by
/// the database on insert; the store never generates ids client-side.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username TEXT NOT NULL,
///     password TEXT NOT NULL,
///     email TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};

use super::task::Task;

/// User account with its owned tasks
///
/// The `tasks` collection is populated only by the aggregate read
/// ([`crate::repo::UserStore::all_users_with_tasks`]); single-entity
/// operations leave it empty. Task order is the order the aggregate query
/// returned them in, which is not guaranteed stable across calls.
///
/// The password is an opaque string at this layer; hashing and validation
/// belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identity
    pub id: i32,

    /// Login name
    pub username: String,

    /// Opaque password string
    pub password: String,

    /// Email address
    pub email: String,

    /// Tasks owned by this user
    pub tasks: Vec<Task>,
}

/// Input for inserting a new user
///
/// Carries every column except the identity, which the database assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name
    pub username: String,

    /// Opaque password string
    pub password: String,

    /// Email address
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_with_nested_tasks() {
        let user = User {
            id: 1,
            username: "ada".to_string(),
            password: "secret".to_string(),
            email: "ada@example.com".to_string(),
            tasks: Vec::new(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "ada");
        assert!(json["tasks"].as_array().unwrap().is_empty());
    }
}
