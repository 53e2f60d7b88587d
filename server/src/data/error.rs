//! Unified error type for data layer
//!
//! This module provides a unified error type that can represent errors from
//! both database backends (SQLite, PostgreSQL).

use thiserror::Error;

use crate::domain::query::EntityKind;

/// Unified error type for data layer operations
///
/// This error type wraps backend-specific errors while preserving context
/// about which backend generated the error.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// Read schema could not be applied
    #[error("Schema setup failed on {backend}: {error}")]
    SchemaFailed {
        backend: &'static str,
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A query was routed to a repository method for another entity
    #[error("Query for {actual:?} passed where {expected:?} was expected")]
    EntityMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Create a PostgreSQL error with preserved context
    pub fn from_postgres(e: sqlx::Error) -> Self {
        Self::Postgres(e)
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) | Self::Postgres(e) => {
                matches!(
                    e,
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
            }
            _ => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::SchemaFailed { backend, .. } => backend,
            Self::Config(_) | Self::Io(_) | Self::EntityMismatch { .. } => "unknown",
        }
    }
}

/// Convert from the backend-specific SqliteError type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::from_sqlite(e),
            crate::data::sqlite::SqliteError::SchemaFailed(error) => Self::SchemaFailed {
                backend: "sqlite",
                error,
            },
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
        }
    }
}

/// Convert from the backend-specific PostgresError type
impl From<crate::data::postgres::PostgresError> for DataError {
    fn from(e: crate::data::postgres::PostgresError) -> Self {
        match e {
            crate::data::postgres::PostgresError::Database(e) => Self::from_postgres(e),
            crate::data::postgres::PostgresError::SchemaFailed(error) => Self::SchemaFailed {
                backend: "postgres",
                error,
            },
            crate::data::postgres::PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_failed_display() {
        let err = DataError::SchemaFailed {
            backend: "postgres",
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schema setup failed on postgres: syntax error"
        );
        assert_eq!(err.backend(), "postgres");
    }

    #[test]
    fn test_transient_errors() {
        assert!(DataError::from_sqlite(sqlx::Error::PoolTimedOut).is_transient());
        assert!(DataError::from_postgres(sqlx::Error::PoolClosed).is_transient());
        assert!(!DataError::from_sqlite(sqlx::Error::RowNotFound).is_transient());
        assert!(!DataError::Config("bad".to_string()).is_transient());
    }

    #[test]
    fn test_from_sqlite_error() {
        let err: DataError = crate::data::sqlite::SqliteError::SchemaFailed("boom".into()).into();
        assert_eq!(err.backend(), "sqlite");
    }

    #[test]
    fn test_backend_database_errors_keep_transience() {
        let err: DataError =
            crate::data::sqlite::SqliteError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DataError::Sqlite(_)));
        assert!(err.is_transient());

        let err: DataError =
            crate::data::postgres::PostgresError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(err.backend(), "postgres");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_from_postgres_config_error() {
        let err: DataError =
            crate::data::postgres::PostgresError::Config("missing url".into()).into();
        assert!(matches!(err, DataError::Config(msg) if msg == "missing url"));
    }

    #[test]
    fn test_entity_mismatch_display() {
        let err = DataError::EntityMismatch {
            expected: EntityKind::User,
            actual: EntityKind::Score,
        };
        assert_eq!(
            err.to_string(),
            "Query for Score passed where User was expected"
        );
    }
}
