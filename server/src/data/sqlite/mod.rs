//! SQLite database service
//!
//! Embedded backend for single-host deployments:
//! - WAL mode so the importer can write while the API reads
//! - In-memory temp storage for sorting large result sets
//!
//! The read schema is created on start-up if it does not exist.

pub mod error;
mod repository_impl;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::log::LevelFilter;

use crate::core::config::SqliteConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_CACHE_SIZE, SQLITE_MAX_CONNECTIONS};

/// SQLite database service
///
/// Should be created once at server startup and shared across all handlers.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Open (or create) the database file and ensure the schema exists
    pub async fn init(config: &SqliteConfig) -> Result<Self, SqliteError> {
        let db_path = &config.path;
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .pragma("cache_size", SQLITE_CACHE_SIZE)
            .pragma("temp_store", "MEMORY")
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        ensure_schema(&pool).await?;

        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a SqliteService from an existing pool (primarily for testing)
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

async fn ensure_schema(pool: &SqlitePool) -> Result<(), SqliteError> {
    sqlx::raw_sql(schema::SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| SqliteError::SchemaFailed(e.to_string()))?;
    Ok(())
}

/// In-memory database with the real schema and fixture helpers
#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::{SqliteService, ensure_schema};

    pub fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Single-connection pool so every query sees the same memory database
    pub async fn memory_service() -> SqliteService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        SqliteService::from_pool(pool)
    }

    pub async fn insert_user(db: &SqliteService, server: &str, user_id: i64, username: &str) {
        sqlx::query(
            "INSERT INTO users (server, user_id, username, country, clan_id, registered_on, \
             latest_activity, restricted) VALUES (?, ?, ?, 'us', NULL, ?, ?, 0)",
        )
        .bind(server)
        .bind(user_id)
        .bind(username)
        .bind(day("2020-01-01"))
        .bind(day("2024-01-01"))
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_clan(db: &SqliteService, server: &str, clan_id: i64, name: &str) {
        sqlx::query(
            "INSERT INTO clans (server, clan_id, name, tag, owner_id, member_count) \
             VALUES (?, ?, ?, 'TAG', 1, 10)",
        )
        .bind(server)
        .bind(clan_id)
        .bind(name)
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_beatmapset(db: &SqliteService, beatmapset_id: i64) {
        sqlx::query(
            "INSERT INTO beatmapsets (beatmapset_id, artist, title, creator, source, last_update) \
             VALUES (?, 'Artist', 'Title', 'Mapper', '', ?)",
        )
        .bind(beatmapset_id)
        .bind(day("2021-06-01"))
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_beatmap(db: &SqliteService, beatmap_id: i64, beatmapset_id: i64, stars: f64) {
        sqlx::query(
            "INSERT INTO beatmaps (beatmap_id, beatmapset_id, artist, title, version, mode, \
             status, stars, length, bpm, ar, od, cs, hp, max_combo, last_update) \
             VALUES (?, ?, 'Artist', 'Title', 'Insane', 0, 1, ?, 120, 180.0, 9.0, 8.0, 4.0, 5.0, 800, ?)",
        )
        .bind(beatmap_id)
        .bind(beatmapset_id)
        .bind(stars)
        .bind(day("2021-06-01"))
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_pack(db: &SqliteService, tag: &str, beatmapset_ids: &[i64]) {
        sqlx::query("INSERT INTO beatmap_packs (tag, name, created_on) VALUES (?, ?, ?)")
            .bind(tag)
            .bind(format!("Pack {}", tag))
            .bind(day("2022-01-01"))
            .execute(db.pool())
            .await
            .unwrap();
        for id in beatmapset_ids {
            sqlx::query("INSERT INTO beatmap_pack_entries (tag, beatmapset_id) VALUES (?, ?)")
                .bind(tag)
                .bind(*id)
                .execute(db.pool())
                .await
                .unwrap();
        }
    }

    pub async fn insert_score(
        db: &SqliteService,
        score_id: i64,
        user_id: i64,
        beatmap_id: i64,
        pp: f64,
        completed: i64,
    ) {
        sqlx::query(
            "INSERT INTO scores (server, score_id, user_id, beatmap_id, mode, relax, score, \
             accuracy, pp, max_combo, mods, rank, completed, date) \
             VALUES ('akatsuki', ?, ?, ?, 0, 1, 1000000, 98.5, ?, 500, 0, 'A', ?, ?)",
        )
        .bind(score_id)
        .bind(user_id)
        .bind(beatmap_id)
        .bind(pp)
        .bind(completed)
        .bind(day("2024-01-01"))
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_stats(db: &SqliteService, user_id: i64, date: &str, pp: f64) {
        sqlx::query(
            "INSERT INTO user_stats (server, user_id, mode, relax, date, ranked_score, \
             total_score, play_count, play_time, accuracy, pp, global_rank, country_rank) \
             VALUES ('akatsuki', ?, 0, 1, ?, 1, 2, 3, 4, 99.0, ?, 10, 2)",
        )
        .bind(user_id)
        .bind(day(date))
        .bind(pp)
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_leaderboard(
        db: &SqliteService,
        user_id: i64,
        kind: &str,
        global_rank: i64,
        country: &str,
    ) {
        sqlx::query(
            "INSERT INTO leaderboard (server, user_id, mode, relax, leaderboard_type, date, \
             country, ranked_score, total_score, play_count, accuracy, pp, global_rank, \
             country_rank) VALUES ('akatsuki', ?, 0, 1, ?, ?, ?, 1, 2, 3, 98.0, ?, ?, 1)",
        )
        .bind(user_id)
        .bind(kind)
        .bind(day("2024-01-01"))
        .bind(country)
        .bind(10000.0 / global_rank as f64)
        .bind(global_rank)
        .execute(db.pool())
        .await
        .unwrap();
    }

    pub async fn insert_first_place(db: &SqliteService, user_id: i64, beatmap_id: i64, date: &str) {
        sqlx::query(
            "INSERT INTO first_places (server, user_id, mode, relax, beatmap_id, date, \
             score_id, score, accuracy, pp) VALUES ('akatsuki', ?, 0, 1, ?, ?, ?, 1000, 99.0, 300.0)",
        )
        .bind(user_id)
        .bind(beatmap_id)
        .bind(day(date))
        .bind(beatmap_id * 10)
        .execute(db.pool())
        .await
        .unwrap();
    }
}
