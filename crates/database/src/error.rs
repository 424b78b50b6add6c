use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database URL: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Failed to create the database schema: {0}")]
    SchemaError(#[source] sqlx::Error),

    #[error("The database write did not finish within {0:?}")]
    Timeout(Duration),

    #[error("The row violates a table constraint: {0}")]
    Constraint(String),

    #[error("The database is unavailable: {0}")]
    Unavailable(String),

    #[error("The database query failed: {0}")]
    QueryError(#[source] sqlx::Error),

    #[error("Value cannot be stored: {0}")]
    InvalidValue(String),
}

impl DbError {
    /// Sorts a failed write into the persistence error it represents.
    pub(crate) fn from_write(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if !matches!(db.kind(), sqlx::error::ErrorKind::Other) => {
                DbError::Constraint(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                DbError::Unavailable(e.to_string())
            }
            other => DbError::QueryError(other),
        }
    }
}
