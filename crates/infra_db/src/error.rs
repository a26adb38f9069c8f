//! Database error types

use thiserror::Error;

use core_kernel::StoreError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DatabaseError::NotFound(_) | DatabaseError::SqlError(sqlx::Error::RowNotFound)
        )
    }
}

/// Maps backend failures onto the storage-port error contract
///
/// Everything except a missing record surfaces as `Unavailable` so callers
/// can treat it as retryable; a failed query is never reported as success.
impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(entity) => StoreError::NotFound(entity),
            DatabaseError::SqlError(sqlx::Error::RowNotFound) => {
                StoreError::NotFound("record".to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Shortcut used by the repositories to convert raw sqlx failures
pub(crate) fn store_err(error: sqlx::Error) -> StoreError {
    StoreError::from(DatabaseError::SqlError(error))
}
