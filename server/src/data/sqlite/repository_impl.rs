//! StatsRepository trait implementation for SQLite

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite, SqlitePool};

use crate::data::error::DataError;
use crate::data::sql::{
    Backend, SqliteDialect, SqlStatement, bind_params, pack_beatmaps_statement,
    pack_completed_statement,
};
use crate::data::traits::{StatsRepository, expect_kind};
use crate::data::types::{
    BeatmapPackRow, BeatmapRow, BeatmapsetRow, ClanRow, FirstPlaceRow, LeaderboardRow,
    PackCompletion, ScoreRow, StatsRow, UserRow,
};
use crate::domain::query::{EntityKind, EntityQuery, PageResult, UserModeKey};

use super::{SqliteError, SqliteService};

/// Count then fetch the window. Unpaged queries skip the count.
async fn fetch_page<T>(pool: &SqlitePool, query: &EntityQuery) -> Result<PageResult<T>, SqliteError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let select = query.select_statement(&SqliteDialect);
    tracing::trace!(sql = %select.sql, params = select.params.values.len(), "Entity select");

    let total_count = match query.page() {
        Some(_) => {
            let count = query.count_statement(&SqliteDialect);
            let total: i64 = bind_params!(sqlx::query_scalar::<Sqlite, i64>(&count.sql), count.params)
                .fetch_one(pool)
                .await?;
            Some(u64::try_from(total).unwrap_or(0))
        }
        None => None,
    };

    let items: Vec<T> = bind_params!(sqlx::query_as::<Sqlite, T>(&select.sql), select.params)
        .fetch_all(pool)
        .await?;

    Ok(PageResult {
        total_count: total_count.unwrap_or(items.len() as u64),
        items,
    })
}

async fn fetch_ids(pool: &SqlitePool, stmt: SqlStatement) -> Result<Vec<i64>, SqliteError> {
    let ids = bind_params!(sqlx::query_scalar::<Sqlite, i64>(&stmt.sql), stmt.params)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

impl SqliteService {
    async fn search<T>(
        &self,
        query: &EntityQuery,
        kind: EntityKind,
    ) -> Result<PageResult<T>, DataError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        expect_kind(query, kind)?;
        fetch_page(self.pool(), query).await.map_err(Into::into)
    }
}

#[async_trait]
impl StatsRepository for SqliteService {
    fn backend(&self) -> Backend {
        Backend::Sqlite
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
        let pack = fetch_ids(self.pool(), pack_beatmaps_statement(&SqliteDialect, tag)).await?;
        let completed = fetch_ids(
            self.pool(),
            pack_completed_statement(&SqliteDialect, tag, key),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::find_one;
    use crate::data::sqlite::testing::*;
    use crate::domain::query::PageRequest;

    async fn seeded_scores() -> SqliteService {
        let db = memory_service().await;
        for i in 1..=25 {
            insert_score(&db, i, 1000 + (i % 3), 500 + i, 10.0 * i as f64, 3).await;
        }
        db
    }

    #[tokio::test]
    async fn test_total_is_independent_of_window() {
        let db = seeded_scores().await;
        let base = EntityQuery::new(EntityKind::Score).with_filter("pp>=100").unwrap();

        let first = db
            .search_scores(&base.clone().paged(PageRequest::new(1, 5)))
            .await
            .unwrap();
        let third = db
            .search_scores(&base.clone().paged(PageRequest::new(3, 7)))
            .await
            .unwrap();

        assert_eq!(first.total_count, 16);
        assert_eq!(third.total_count, 16);
        assert_eq!(first.items.len(), 5);
        assert_eq!(third.items.len(), 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_with_total() {
        let db = seeded_scores().await;
        let page = db
            .search_scores(&EntityQuery::new(EntityKind::Score).paged(PageRequest::new(50, 10)))
            .await
            .unwrap();
        assert_eq!(page.total_count, 25);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_sort_and_tiebreak() {
        let db = seeded_scores().await;
        let page = db
            .search_scores(
                &EntityQuery::new(EntityKind::Score)
                    .sorted_by(Some("pp"), true)
                    .unwrap()
                    .paged(PageRequest::new(1, 3)),
            )
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|s| s.score_id).collect();
        assert_eq!(ids, vec![25, 24, 23]);

        // Default order falls back to the primary key
        let page = db
            .search_scores(&EntityQuery::new(EntityKind::Score).paged(PageRequest::new(1, 3)))
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|s| s.score_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_filters_are_and_ed() {
        let db = seeded_scores().await;
        let page = db
            .search_scores(
                &EntityQuery::new(EntityKind::Score)
                    .with_filter("user_id=1000,pp<100")
                    .unwrap()
                    .paged(PageRequest::default()),
            )
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|s| s.score_id).collect();
        assert_eq!(ids, vec![3, 6, 9]);
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_date_and_boolean_filters() {
        let db = memory_service().await;
        insert_user(&db, "akatsuki", 1, "alpha").await;
        insert_user(&db, "akatsuki", 2, "beta").await;
        sqlx::query("UPDATE users SET restricted = 1 WHERE user_id = 2")
            .execute(db.pool())
            .await
            .unwrap();

        let restricted = db
            .search_users(
                &EntityQuery::new(EntityKind::User)
                    .with_filter("restricted=true,registered_on<2021-01-01")
                    .unwrap()
                    .paged(PageRequest::default()),
            )
            .await
            .unwrap();
        assert_eq!(restricted.total_count, 1);
        assert_eq!(restricted.items[0].username, "beta");
        assert!(restricted.items[0].restricted);
    }

    #[tokio::test]
    async fn test_find_one_by_primary_key() {
        let db = memory_service().await;
        insert_clan(&db, "akatsuki", 42, "Team").await;

        let query = EntityQuery::new(EntityKind::Clan)
            .with_scope("server", "akatsuki")
            .unwrap()
            .with_scope("id", 42i64)
            .unwrap()
            .single();
        let clan = find_one(db.search_clans(&query)).await.unwrap().unwrap();
        assert_eq!(clan.name, "Team");

        let missing = EntityQuery::new(EntityKind::Clan)
            .with_scope("id", 7i64)
            .unwrap()
            .single();
        assert!(find_one(db.search_clans(&missing)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unpaged_query_counts_rows() {
        let db = memory_service().await;
        insert_beatmapset(&db, 10).await;
        insert_beatmap(&db, 100, 10, 5.5).await;
        insert_beatmap(&db, 101, 10, 6.5).await;

        let set = find_one(
            db.search_beatmapsets(
                &EntityQuery::new(EntityKind::Beatmapset)
                    .with_scope("id", 10i64)
                    .unwrap()
                    .single(),
            ),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(set.creator, "Mapper");

        let maps = db
            .search_beatmaps(
                &EntityQuery::new(EntityKind::Beatmap)
                    .with_scope("beatmapset_id", 10i64)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(maps.total_count, 2);
        assert_eq!(maps.items[1].stars, 6.5);
    }

    #[tokio::test]
    async fn test_leaderboard_default_order() {
        let db = memory_service().await;
        insert_leaderboard(&db, 1, "pp", 3, "us").await;
        insert_leaderboard(&db, 2, "pp", 1, "de").await;
        insert_leaderboard(&db, 3, "pp", 2, "us").await;
        insert_leaderboard(&db, 4, "score", 1, "us").await;

        let page = db
            .search_leaderboard(
                &EntityQuery::new(EntityKind::Leaderboard)
                    .with_scope("leaderboard_type", "pp")
                    .unwrap()
                    .paged(PageRequest::default()),
            )
            .await
            .unwrap();
        let ranks: Vec<i64> = page.items.iter().map(|r| r.global_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stats_rows_by_key() {
        let db = memory_service().await;
        insert_stats(&db, 7, "2024-01-02", 200.0).await;
        insert_stats(&db, 7, "2024-01-01", 100.0).await;
        insert_stats(&db, 8, "2024-01-01", 999.0).await;

        let key = UserModeKey::new("akatsuki", 7, 0, 1);
        let stats = db
            .search_stats(&key.query(EntityKind::Stats).unwrap())
            .await
            .unwrap();
        let dates: Vec<_> = stats.items.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day("2024-01-01"), day("2024-01-02")]);
    }

    #[tokio::test]
    async fn test_pack_completion() {
        let db = memory_service().await;
        insert_beatmapset(&db, 1).await;
        insert_beatmapset(&db, 2).await;
        insert_beatmap(&db, 11, 1, 4.0).await;
        insert_beatmap(&db, 12, 1, 5.0).await;
        insert_beatmap(&db, 21, 2, 6.0).await;
        insert_pack(&db, "S100", &[1, 2]).await;

        insert_score(&db, 1, 7, 11, 100.0, 3).await;
        // Not a completed best score
        insert_score(&db, 2, 7, 21, 100.0, 2).await;
        // Another user
        insert_score(&db, 3, 8, 12, 100.0, 3).await;

        let key = UserModeKey::new("akatsuki", 7, 0, 1);
        let completion = db.pack_completion("S100", &key).await.unwrap();
        assert_eq!(completion.completed, vec![11]);
        assert_eq!(completion.uncompleted, vec![12, 21]);
    }

    #[tokio::test]
    async fn test_first_place_rows() {
        let db = memory_service().await;
        insert_first_place(&db, 7, 100, "2024-01-01").await;
        insert_first_place(&db, 7, 101, "2024-01-02").await;

        let key = UserModeKey::new("akatsuki", 7, 0, 1);
        let rows = db
            .search_first_places(&key.query(EntityKind::FirstPlace).unwrap())
            .await
            .unwrap();
        // Newest first
        assert_eq!(rows.items[0].beatmap_id, 101);
        assert_eq!(rows.items[0].score_id, 1010);
    }

    #[tokio::test]
    async fn test_wrong_entity_is_rejected() {
        let db = memory_service().await;
        let err = db
            .search_users(&EntityQuery::new(EntityKind::Score))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::EntityMismatch { .. }));
    }

    #[tokio::test]
    async fn test_backend() {
        let db = memory_service().await;
        assert_eq!(db.backend(), Backend::Sqlite);
    }
}
