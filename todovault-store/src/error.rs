/// Error types for the store
///
/// Every repository operation returns a [`StoreResult`]. The error kinds
/// form a small closed set so callers can branch on cause rather than on
/// message content:
///
/// - [`StoreError::UserNotFound`]: a referenced user does not exist
/// - [`StoreError::Constraint`]: a statement was rejected by a named
///   uniqueness or foreign-key constraint
/// - [`StoreError::Operation`]: any other statement or connection failure,
///   wrapped with operation-specific context
///
/// `UserNotFound` is raised by the store itself and is never rewrapped as
/// an `Operation` failure, so upstream layers can map it to a distinct
/// "missing resource" response.

use thiserror::Error;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced user does not exist
    #[error("user {0} does not exist")]
    UserNotFound(i32),

    /// A statement was rejected by a named database constraint
    #[error("failed to {context}: constraint {constraint} violated")]
    Constraint {
        /// The operation that failed (e.g., "add task")
        context: &'static str,

        /// Name of the violated constraint
        constraint: String,

        /// The underlying database error
        #[source]
        source: sqlx::Error,
    },

    /// A statement or connection failure
    #[error("failed to {context}")]
    Operation {
        /// The operation that failed (e.g., "add user")
        context: &'static str,

        /// The underlying database error
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Wraps a database error with operation context, classifying named
    /// constraint violations into [`StoreError::Constraint`].
    ///
    /// Intended for `map_err` at statement boundaries:
    ///
    /// ```no_run
    /// # use todovault_store::error::{StoreError, StoreResult};
    /// # async fn example(pool: sqlx::PgPool) -> StoreResult<()> {
    /// sqlx::query("DELETE FROM tasks WHERE id = $1")
    ///     .bind(1i32)
    ///     .execute(&pool)
    ///     .await
    ///     .map_err(StoreError::op("delete task"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn op(context: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
        move |source| {
            let constraint = match &source {
                sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_owned),
                _ => None,
            };

            match constraint {
                Some(constraint) => StoreError::Constraint {
                    context,
                    constraint,
                    source,
                },
                None => StoreError::Operation { context, source },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_display() {
        let err = StoreError::UserNotFound(42);
        assert_eq!(err.to_string(), "user 42 does not exist");
    }

    #[test]
    fn test_operation_display() {
        let err = StoreError::op("add user")(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "failed to add user");
    }

    #[test]
    fn test_op_without_constraint_is_operation() {
        let err = StoreError::op("delete task")(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Operation { context: "delete task", .. }));
    }
}
