//! Beatmap, beatmapset and pack endpoints

pub mod types;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{JsonPath, ValidatedQuery};
use crate::api::types::{ApiError, ListParams};
use crate::data::find_one;
use crate::data::types::{BeatmapPackRow, BeatmapRow, PackCompletion};
use crate::domain::query::{EntityKind, EntityQuery, UserModeKey};

use super::StatsApiState;
use types::{BeatmapListResponse, BeatmapsetDetail};

/// Build Beatmap API routes
pub fn routes(state: StatsApiState) -> Router<()> {
    Router::new()
        .route("/api/v1/beatmap/search", get(search_beatmaps))
        .route("/api/v1/beatmap/{id}", get(get_beatmap))
        .route("/api/v1/beatmapset/{id}", get(get_beatmapset))
        .route("/api/v1/beatmap/pack/{tag}", get(get_beatmap_pack))
        .route(
            "/api/v1/beatmap/pack/{tag}/completion",
            get(get_pack_completion),
        )
        .with_state(state)
}

fn by_id(kind: EntityKind, id: i64) -> Result<EntityQuery, ApiError> {
    Ok(EntityQuery::new(kind).with_scope("id", id)?.single())
}

async fn find_pack(state: &StatsApiState, tag: &str) -> Result<Option<BeatmapPackRow>, ApiError> {
    let query = EntityQuery::new(EntityKind::BeatmapPack)
        .with_scope("tag", tag)?
        .single();
    find_one(state.repo.search_beatmap_packs(&query))
        .await
        .map_err(ApiError::from_data)
}

/// Get a beatmap by id
#[utoipa::path(
    get,
    path = "/api/v1/beatmap/{id}",
    tag = "beatmaps",
    params(("id" = i64, Path, description = "Beatmap id")),
    responses(
        (status = 200, description = "Beatmap", body = BeatmapRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_beatmap(
    State(state): State<StatsApiState>,
    JsonPath(id): JsonPath<i64>,
) -> Result<Json<BeatmapRow>, ApiError> {
    find_one(state.repo.search_beatmaps(&by_id(EntityKind::Beatmap, id)?))
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Search beatmaps with a filter expression
#[utoipa::path(
    get,
    path = "/api/v1/beatmap/search",
    tag = "beatmaps",
    params(ListParams),
    responses(
        (status = 200, description = "Matching beatmaps", body = BeatmapListResponse),
        (status = 400, description = "Invalid filter or sort field")
    )
)]
pub async fn search_beatmaps(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<BeatmapListResponse>, ApiError> {
    let query = params.apply(EntityQuery::new(EntityKind::Beatmap), false)?;
    let page = state
        .repo
        .search_beatmaps(&query)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(BeatmapListResponse {
        count: page.total_count,
        beatmaps: page.items,
    }))
}

/// Get a beatmapset and its beatmaps
#[utoipa::path(
    get,
    path = "/api/v1/beatmapset/{id}",
    tag = "beatmaps",
    params(("id" = i64, Path, description = "Beatmapset id")),
    responses(
        (status = 200, description = "Beatmapset", body = BeatmapsetDetail),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_beatmapset(
    State(state): State<StatsApiState>,
    JsonPath(id): JsonPath<i64>,
) -> Result<Json<BeatmapsetDetail>, ApiError> {
    let beatmapset = find_one(
        state
            .repo
            .search_beatmapsets(&by_id(EntityKind::Beatmapset, id)?),
    )
    .await
    .map_err(ApiError::from_data)?
    .ok_or_else(ApiError::not_found)?;

    let beatmaps = EntityQuery::new(EntityKind::Beatmap).with_scope("beatmapset_id", id)?;
    let beatmaps = state
        .repo
        .search_beatmaps(&beatmaps)
        .await
        .map_err(ApiError::from_data)?
        .items;

    Ok(Json(BeatmapsetDetail {
        beatmapset,
        beatmaps,
    }))
}

/// Get a beatmap pack by tag
#[utoipa::path(
    get,
    path = "/api/v1/beatmap/pack/{tag}",
    tag = "beatmaps",
    params(("tag" = String, Path, description = "Pack tag")),
    responses(
        (status = 200, description = "Beatmap pack", body = BeatmapPackRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_beatmap_pack(
    State(state): State<StatsApiState>,
    JsonPath(tag): JsonPath<String>,
) -> Result<Json<BeatmapPackRow>, ApiError> {
    find_pack(&state, &tag)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Split a pack's beatmaps by whether the user has completed them
#[utoipa::path(
    get,
    path = "/api/v1/beatmap/pack/{tag}/completion",
    tag = "beatmaps",
    params(("tag" = String, Path, description = "Pack tag"), UserModeKey),
    responses(
        (status = 200, description = "Completed and uncompleted beatmap ids", body = PackCompletion),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_pack_completion(
    State(state): State<StatsApiState>,
    JsonPath(tag): JsonPath<String>,
    ValidatedQuery(key): ValidatedQuery<UserModeKey>,
) -> Result<Json<PackCompletion>, ApiError> {
    if find_pack(&state, &tag).await?.is_none() {
        return Err(ApiError::not_found());
    }
    let completion = state
        .repo
        .pack_completion(&tag, &key)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(completion))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::api::routes::testing::{get_json, state};
    use crate::data::sqlite::testing::*;

    async fn router() -> Router {
        let db = memory_service().await;
        insert_beatmapset(&db, 1).await;
        insert_beatmapset(&db, 2).await;
        insert_beatmap(&db, 11, 1, 4.5).await;
        insert_beatmap(&db, 12, 1, 6.2).await;
        insert_beatmap(&db, 21, 2, 7.1).await;
        insert_pack(&db, "S1", &[1, 2]).await;
        insert_score(&db, 100, 5, 12, 300.0, 3).await;
        routes(state(db))
    }

    #[tokio::test]
    async fn test_get_beatmap() {
        let (status, body) = get_json(router().await, "/api/v1/beatmap/12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 12);
        assert_eq!(body["beatmapset_id"], 1);

        let (status, _) = get_json(router().await, "/api/v1/beatmap/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json(router().await, "/api/v1/beatmap/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PATH_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_search_beatmaps() {
        let (status, body) = get_json(
            router().await,
            "/api/v1/beatmap/search?query=stars%3E5&sort=stars&desc=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["beatmaps"][0]["id"], 21);

        let (status, body) =
            get_json(router().await, "/api/v1/beatmap/search?sort=version").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSORTABLE_FIELD");
    }

    #[tokio::test]
    async fn test_get_beatmapset_with_beatmaps() {
        let (status, body) = get_json(router().await, "/api/v1/beatmapset/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["creator"], "Mapper");
        let ids: Vec<i64> = body["beatmaps"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[tokio::test]
    async fn test_pack_and_completion() {
        let (status, body) = get_json(router().await, "/api/v1/beatmap/pack/S1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Pack S1");

        let (status, body) = get_json(
            router().await,
            "/api/v1/beatmap/pack/S1/completion?server=akatsuki&user_id=5&mode=0&relax=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completed"], serde_json::json!([12]));
        assert_eq!(body["uncompleted"], serde_json::json!([11, 21]));

        let (status, _) = get_json(
            router().await,
            "/api/v1/beatmap/pack/NOPE/completion?server=akatsuki&user_id=5&mode=0&relax=1",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
