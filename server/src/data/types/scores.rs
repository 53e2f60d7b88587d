//! Score, stats, leaderboard and first place rows

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Score row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ScoreRow {
    pub server: String,
    #[serde(rename = "id")]
    pub score_id: i64,
    pub user_id: i64,
    pub beatmap_id: i64,
    pub mode: i64,
    pub relax: i64,
    pub score: i64,
    pub accuracy: f64,
    pub pp: f64,
    pub max_combo: i64,
    pub mods: i64,
    pub rank: String,
    pub completed: i64,
    pub date: NaiveDate,
}

/// Daily stats snapshot for one user/mode/relax
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct StatsRow {
    pub server: String,
    pub user_id: i64,
    pub mode: i64,
    pub relax: i64,
    pub date: NaiveDate,
    pub ranked_score: i64,
    pub total_score: i64,
    pub play_count: i64,
    pub play_time: i64,
    pub accuracy: f64,
    pub pp: f64,
    pub global_rank: i64,
    pub country_rank: i64,
}

/// Current leaderboard position, one row per user and leaderboard type
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct LeaderboardRow {
    pub server: String,
    pub user_id: i64,
    pub mode: i64,
    pub relax: i64,
    pub leaderboard_type: String,
    pub date: NaiveDate,
    pub country: String,
    pub ranked_score: i64,
    pub total_score: i64,
    pub play_count: i64,
    pub accuracy: f64,
    pub pp: f64,
    pub global_rank: i64,
    pub country_rank: i64,
}

/// A first place held by a user on a beatmap at a snapshot date
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct FirstPlaceRow {
    pub server: String,
    pub user_id: i64,
    pub mode: i64,
    pub relax: i64,
    pub beatmap_id: i64,
    pub date: NaiveDate,
    pub score_id: i64,
    pub score: i64,
    pub accuracy: f64,
    pub pp: f64,
}
