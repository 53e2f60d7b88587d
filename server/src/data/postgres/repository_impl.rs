//! StatsRepository trait implementation for PostgreSQL

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};

use crate::data::error::DataError;
use crate::data::sql::{
    Backend, PostgresDialect, SqlStatement, bind_params, pack_beatmaps_statement,
    pack_completed_statement,
};
use crate::data::traits::{StatsRepository, expect_kind};
use crate::data::types::{
    BeatmapPackRow, BeatmapRow, BeatmapsetRow, ClanRow, FirstPlaceRow, LeaderboardRow,
    PackCompletion, ScoreRow, StatsRow, UserRow,
};
use crate::domain::query::{EntityKind, EntityQuery, PageResult, UserModeKey};

use super::{PostgresError, PostgresService};

async fn fetch_page<T>(pool: &PgPool, query: &EntityQuery) -> Result<PageResult<T>, PostgresError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let select = query.select_statement(&PostgresDialect);
    tracing::trace!(sql = %select.sql, params = select.params.values.len(), "Entity select");

    let total_count = if query.page().is_some() {
        let count = query.count_statement(&PostgresDialect);
        let total: i64 =
            bind_params!(sqlx::query_scalar::<Postgres, i64>(&count.sql), count.params)
                .fetch_one(pool)
                .await?;
        Some(u64::try_from(total).unwrap_or(0))
    } else {
        None
    };

    let items: Vec<T> = bind_params!(sqlx::query_as::<Postgres, T>(&select.sql), select.params)
        .fetch_all(pool)
        .await?;

    Ok(PageResult {
        total_count: total_count.unwrap_or(items.len() as u64),
        items,
    })
}

async fn fetch_ids(pool: &PgPool, stmt: SqlStatement) -> Result<Vec<i64>, PostgresError> {
    Ok(
        bind_params!(sqlx::query_scalar::<Postgres, i64>(&stmt.sql), stmt.params)
            .fetch_all(pool)
            .await?,
    )
}

impl PostgresService {
    async fn search<T>(
        &self,
        query: &EntityQuery,
        kind: EntityKind,
    ) -> Result<PageResult<T>, DataError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        expect_kind(query, kind)?;
        Ok(fetch_page(self.pool(), query).await?)
    }
}

#[async_trait]
impl StatsRepository for PostgresService {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn search_users(&self, query: &EntityQuery) -> Result<PageResult<UserRow>, DataError> {
        self.search(query, EntityKind::User).await
    }

    async fn search_clans(&self, query: &EntityQuery) -> Result<PageResult<ClanRow>, DataError> {
        self.search(query, EntityKind::Clan).await
    }

    async fn search_beatmaps(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapRow>, DataError> {
        self.search(query, EntityKind::Beatmap).await
    }

    async fn search_beatmapsets(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapsetRow>, DataError> {
        self.search(query, EntityKind::Beatmapset).await
    }

    async fn search_beatmap_packs(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<BeatmapPackRow>, DataError> {
        self.search(query, EntityKind::BeatmapPack).await
    }

    async fn pack_completion(
        &self,
        tag: &str,
        key: &UserModeKey,
    ) -> Result<PackCompletion, DataError> {
        let pack = fetch_ids(self.pool(), pack_beatmaps_statement(&PostgresDialect, tag)).await?;
        let completed = fetch_ids(
            self.pool(),
            pack_completed_statement(&PostgresDialect, tag, key),
        )
        .await?;
        Ok(PackCompletion::partition(pack, &completed))
    }

    async fn search_scores(&self, query: &EntityQuery) -> Result<PageResult<ScoreRow>, DataError> {
        self.search(query, EntityKind::Score).await
    }

    async fn search_stats(&self, query: &EntityQuery) -> Result<PageResult<StatsRow>, DataError> {
        self.search(query, EntityKind::Stats).await
    }

    async fn search_leaderboard(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<LeaderboardRow>, DataError> {
        self.search(query, EntityKind::Leaderboard).await
    }

    async fn search_first_places(
        &self,
        query: &EntityQuery,
    ) -> Result<PageResult<FirstPlaceRow>, DataError> {
        self.search(query, EntityKind::FirstPlace).await
    }
}
