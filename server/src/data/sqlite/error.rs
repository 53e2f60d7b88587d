//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
