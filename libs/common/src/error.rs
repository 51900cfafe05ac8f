//! Custom error types for the common library
//!
//! This module defines the store-level error taxonomy shared by every
//! service. Driver errors are classified so that handlers only ever need to
//! look at `AlreadyExists` and `NotFound`.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique constraint rejected the write
    #[error("Record already exists")]
    AlreadyExists,

    /// No record matched the requested identifier
    #[error("Record not found")]
    NotFound,

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify an error returned by a query.
    ///
    /// Unique violations become [`DatabaseError::AlreadyExists`] and a missing
    /// row becomes [`DatabaseError::NotFound`]; everything else is kept as a
    /// [`DatabaseError::Query`].
    pub fn from_query(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => DatabaseError::NotFound,
            SqlxError::Database(db) if db.is_unique_violation() => DatabaseError::AlreadyExists,
            _ => DatabaseError::Query(err),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
