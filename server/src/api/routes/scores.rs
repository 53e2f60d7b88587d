//! Score endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ListParams, LookupParams};
use crate::data::find_one;
use crate::data::types::ScoreRow;
use crate::domain::query::{EntityKind, EntityQuery};

use super::StatsApiState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreListResponse {
    pub count: u64,
    pub scores: Vec<ScoreRow>,
}

/// Build Score API routes
pub fn routes(state: StatsApiState) -> Router<()> {
    Router::new()
        .route("/api/v1/score", get(get_score))
        .route("/api/v1/score/search", get(search_scores))
        .with_state(state)
}

/// Get a score by server and id
#[utoipa::path(
    get,
    path = "/api/v1/score",
    tag = "scores",
    params(LookupParams),
    responses(
        (status = 200, description = "Score", body = ScoreRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_score(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<LookupParams>,
) -> Result<Json<ScoreRow>, ApiError> {
    let query = params.query(EntityKind::Score)?;
    find_one(state.repo.search_scores(&query))
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Search scores with a filter expression. Sorted descending unless `desc=false`.
#[utoipa::path(
    get,
    path = "/api/v1/score/search",
    tag = "scores",
    params(ListParams),
    responses(
        (status = 200, description = "Matching scores", body = ScoreListResponse),
        (status = 400, description = "Invalid filter or sort field")
    )
)]
pub async fn search_scores(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<ScoreListResponse>, ApiError> {
    let query = params.apply(EntityQuery::new(EntityKind::Score), true)?;
    let page = state
        .repo
        .search_scores(&query)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ScoreListResponse {
        count: page.total_count,
        scores: page.items,
    }))
}
