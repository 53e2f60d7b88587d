//! PostgreSQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = PostgresError::Config("PostgreSQL URL is required".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: PostgreSQL URL is required"
        );
    }

    #[test]
    fn test_error_debug() {
        let err = PostgresError::SchemaFailed("relation exists".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("SchemaFailed"));
    }
}
