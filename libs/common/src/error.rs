//! Errors raised by the shared PostgreSQL helpers
//!
//! Each variant records which stage failed: reading the configuration,
//! opening the pool, running a probe query or applying migrations.

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not reach the server
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement issued by the helpers failed
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// Malformed settings, such as an unparseable URL
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let error = DatabaseError::Configuration("Invalid database URL: empty host".to_string());
        assert_eq!(
            error.to_string(),
            "Database configuration error: Invalid database URL: empty host"
        );
    }
}
