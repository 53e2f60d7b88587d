//! Data storage layer
//!
//! Provides the stats database service for the application:
//! - `sqlite` - Embedded database (default)
//! - `postgres` - Pooled database for shared deployments
//! - `types` - Row types shared by both backends
//! - `traits` - Repository trait for backend-agnostic reads
//! - `sql` - SQL dialects and statement rendering
//! - `error` - Unified error type for all backends

pub mod error;
pub mod postgres;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use error::DataError;

pub use traits::{StatsRepository, find_one};

use std::sync::Arc;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

/// Stats database service enum
///
/// Wraps the underlying backend-specific service (SQLite or PostgreSQL).
/// Services are stored as Arc so repositories can be handed out cheaply.
pub enum StatsService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend (for shared deployments)
    Postgres(Arc<PostgresService>),
}

impl StatsService {
    /// Initialize the service for the configured backend
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(&config.sqlite).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let pg = config.postgres.as_ref().ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(pg).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Get the repository trait object for reads
    pub fn repository(&self) -> Arc<dyn StatsRepository> {
        match self {
            Self::Sqlite(s) => Arc::clone(s) as Arc<dyn StatsRepository>,
            Self::Postgres(p) => Arc::clone(p) as Arc<dyn StatsRepository>,
        }
    }
}
