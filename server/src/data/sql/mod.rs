//! SQL abstraction layer for multi-database support
//!
//! This module provides abstractions for generating SQL that works across
//! the SQLite and PostgreSQL backends.

mod dialect;
mod postgres_dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

use crate::domain::query::{FieldValue, UserModeKey};

/// Database backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Positional bind values collected while rendering a statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlParams {
    pub values: Vec<FieldValue>,
}

impl SqlParams {
    /// Push a value and return its placeholder
    pub fn push(&mut self, value: impl Into<FieldValue>, dialect: &dyn SqlDialect) -> String {
        self.values.push(value.into());
        dialect.placeholder(self.values.len())
    }
}

/// Rendered SQL with its bind values
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: SqlParams,
}

/// Bind every value of a [`SqlParams`] onto a sqlx query, in order.
///
/// Works for `query`, `query_as` and `query_scalar` builders on any backend
/// whose driver encodes `i64`, `f64`, `&str`, `NaiveDate` and `bool`.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for value in &$params.values {
            query = match value {
                $crate::domain::query::FieldValue::Integer(v) => query.bind(*v),
                $crate::domain::query::FieldValue::Float(v) => query.bind(*v),
                $crate::domain::query::FieldValue::String(v) => query.bind(v.as_str()),
                $crate::domain::query::FieldValue::Date(v) => query.bind(*v),
                $crate::domain::query::FieldValue::Boolean(v) => query.bind(*v),
            };
        }
        query
    }};
}
pub(crate) use bind_params;

/// Completed-score status stored by the score importer
pub const COMPLETED_STATUS_BEST: i64 = 3;

/// Beatmap ids belonging to a pack, ordered by id
pub fn pack_beatmaps_statement(dialect: &dyn SqlDialect, tag: &str) -> SqlStatement {
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT b.beatmap_id FROM beatmap_pack_entries e \
         JOIN beatmaps b ON b.beatmapset_id = e.beatmapset_id \
         WHERE e.tag = {} ORDER BY b.beatmap_id",
        params.push(tag, dialect)
    );
    SqlStatement { sql, params }
}

/// Beatmap ids of a pack on which the user holds a completed best score
pub fn pack_completed_statement(
    dialect: &dyn SqlDialect,
    tag: &str,
    key: &UserModeKey,
) -> SqlStatement {
    let mut params = SqlParams::default();
    let tag = params.push(tag, dialect);
    let server = params.push(key.server.as_str(), dialect);
    let user_id = params.push(key.id, dialect);
    let mode = params.push(key.mode, dialect);
    let relax = params.push(key.relax, dialect);
    let completed = params.push(COMPLETED_STATUS_BEST, dialect);
    let sql = format!(
        "SELECT DISTINCT s.beatmap_id FROM scores s \
         JOIN beatmaps b ON b.beatmap_id = s.beatmap_id \
         JOIN beatmap_pack_entries e ON e.beatmapset_id = b.beatmapset_id \
         WHERE e.tag = {} AND s.server = {} AND s.user_id = {} AND s.mode = {} \
         AND s.relax = {} AND s.completed = {} ORDER BY s.beatmap_id",
        tag, server, user_id, mode, relax, completed
    );
    SqlStatement { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> UserModeKey {
        UserModeKey::new("akatsuki", 1001, 0, 1)
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(Backend::Sqlite.to_string(), "sqlite");
        assert_eq!(Backend::Postgres.to_string(), "postgres");
    }

    #[test]
    fn test_params_push_returns_placeholder() {
        let mut params = SqlParams::default();
        assert_eq!(params.push(1i64, &PostgresDialect), "$1");
        assert_eq!(params.push("x", &PostgresDialect), "$2");
        assert_eq!(
            params.values,
            vec![FieldValue::Integer(1), FieldValue::String("x".to_string())]
        );
    }

    #[test]
    fn test_pack_completed_statement_postgres() {
        let stmt = pack_completed_statement(&PostgresDialect, "S1", &key());
        assert!(stmt.sql.contains("WHERE e.tag = $1 AND s.server = $2"));
        assert!(stmt.sql.contains("s.completed = $6"));
        assert_eq!(stmt.params.values.len(), 6);
        assert_eq!(stmt.params.values[5], FieldValue::Integer(COMPLETED_STATUS_BEST));
    }

    #[test]
    fn test_pack_beatmaps_statement_sqlite() {
        let stmt = pack_beatmaps_statement(&SqliteDialect, "S1");
        assert!(stmt.sql.ends_with("WHERE e.tag = ? ORDER BY b.beatmap_id"));
        assert_eq!(stmt.params.values, vec![FieldValue::String("S1".to_string())]);
    }
}
