//! Clan endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ListParams, LookupParams};
use crate::data::find_one;
use crate::data::types::ClanRow;
use crate::domain::query::{EntityKind, EntityQuery};

use super::StatsApiState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClanListResponse {
    pub count: u64,
    pub clans: Vec<ClanRow>,
}

pub fn routes(state: StatsApiState) -> Router<()> {
    Router::new()
        .route("/api/v1/clan", get(get_clan))
        .route("/api/v1/clan/search", get(search_clans))
        .with_state(state)
}

/// Get a clan by server and id
#[utoipa::path(
    get,
    path = "/api/v1/clan",
    tag = "clans",
    params(LookupParams),
    responses(
        (status = 200, description = "Clan", body = ClanRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_clan(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<LookupParams>,
) -> Result<Json<ClanRow>, ApiError> {
    let query = params.query(EntityKind::Clan)?;
    find_one(state.repo.search_clans(&query))
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

#[utoipa::path(
    get,
    path = "/api/v1/clan/search",
    tag = "clans",
    params(ListParams),
    responses(
        (status = 200, description = "Matching clans", body = ClanListResponse),
        (status = 400, description = "Invalid filter or sort field")
    )
)]
pub async fn search_clans(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<ClanListResponse>, ApiError> {
    let query = params.apply(EntityQuery::new(EntityKind::Clan), false)?;
    let page = state
        .repo
        .search_clans(&query)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ClanListResponse {
        count: page.total_count,
        clans: page.items,
    }))
}
