//! Repository traits for database backends
//!
//! This module defines the trait that provides a unified read interface across
//! the SQLite and PostgreSQL backends. Each backend renders an [`EntityQuery`]
//! with its own SQL dialect and decodes rows into the shared row types.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::sql::Backend;
use crate::data::types::{
    BeatmapPackRow, BeatmapRow, BeatmapsetRow, ClanRow, FirstPlaceRow, LeaderboardRow,
    PackCompletion, ScoreRow, StatsRow, UserRow,
};
use crate::domain::query::{EntityKind, EntityQuery, PageResult, UserModeKey};

/// Read-only repository for every stats entity
///
/// Every `search_*` method runs a count and a windowed select built from the
/// same query. When the query has no page window the count is skipped and the
/// total equals the number of rows returned.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    fn backend(&self) -> Backend;

    // ==================== Metadata ====================

    async fn search_users(&self, query: &EntityQuery) -> Result<PageResult<UserRow>, DataError>;

    async fn search_clans(&self, query: &EntityQuery) -> Result<PageResult<ClanRow>, DataError>;

    async fn search_beatmaps(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapRow>, DataError>;

    async fn search_beatmapsets(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapsetRow>, DataError>;

    async fn search_beatmap_packs(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapPackRow>, DataError>;

    /// Split a pack's beatmaps by whether the user holds a completed score
    async fn pack_completion(
        &self,
        tag: &str,
        key: &UserModeKey,
    ) -> Result<PackCompletion, DataError>;

    // ==================== Scores & stats ====================

    async fn search_scores(&self, query: &EntityQuery) -> Result<PageResult<ScoreRow>, DataError>;

    async fn search_stats(&self, query: &EntityQuery) -> Result<PageResult<StatsRow>, DataError>;

    async fn search_leaderboard(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<LeaderboardRow>, DataError>;

    async fn search_first_places(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<FirstPlaceRow>, DataError>;
}

/// Guard against a query being routed to another entity's method
pub(crate) fn expect_kind(query: &EntityQuery, expected: EntityKind) -> Result<(), DataError> {
    if query.kind() == expected {
        Ok(())
    } else {
        Err(DataError::EntityMismatch {
            expected,
            actual: query.kind(),
        })
    }
}

/// First row of a single-row lookup
pub async fn find_one<T>(
    page: impl std::future::Future<Output = Result<PageResult<T>, DataError>>,
) -> Result<Option<T>, DataError> {
    Ok(page.await?.items.into_iter().next())
}
