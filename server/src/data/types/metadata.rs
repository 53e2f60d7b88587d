//! Metadata rows: users, clans, beatmaps and packs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// User types
// ============================================================================

/// User row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct UserRow {
    pub server: String,
    #[serde(rename = "id")]
    pub user_id: i64,
    pub username: String,
    pub country: String,
    pub clan_id: Option<i64>,
    pub registered_on: NaiveDate,
    pub latest_activity: NaiveDate,
    pub restricted: bool,
}

/// Clan row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ClanRow {
    pub server: String,
    #[serde(rename = "id")]
    pub clan_id: i64,
    pub name: String,
    pub tag: String,
    pub owner_id: i64,
    pub member_count: i64,
}

// ============================================================================
// Beatmap types
// ============================================================================

/// Beatmap row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct BeatmapRow {
    #[serde(rename = "id")]
    pub beatmap_id: i64,
    pub beatmapset_id: i64,
    pub artist: String,
    pub title: String,
    pub version: String,
    pub mode: i64,
    pub status: i64,
    pub stars: f64,
    pub length: i64,
    pub bpm: f64,
    pub ar: f64,
    pub od: f64,
    pub cs: f64,
    pub hp: f64,
    pub max_combo: i64,
    pub last_update: NaiveDate,
}

/// Beatmapset row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct BeatmapsetRow {
    #[serde(rename = "id")]
    pub beatmapset_id: i64,
    pub artist: String,
    pub title: String,
    pub creator: String,
    pub source: String,
    pub last_update: NaiveDate,
}

/// Beatmap pack row from database
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct BeatmapPackRow {
    pub tag: String,
    pub name: String,
    pub created_on: NaiveDate,
}
