//! Leaderboard endpoint

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{JsonPath, ValidatedQuery};
use crate::api::types::{ApiError, ListParams, default_length, default_page};
use crate::data::types::LeaderboardRow;
use crate::domain::query::{EntityKind, EntityQuery};

use super::StatsApiState;

/// Leaderboard scope plus the usual list parameters
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    #[validate(length(min = 1, message = "server must not be empty"))]
    pub server: String,
    pub mode: i64,
    pub relax: i64,

    #[serde(default)]
    pub query: String,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be >= 1"))]
    pub page: u32,

    #[serde(default = "default_length")]
    #[validate(range(min = 1, message = "Length must be >= 1"))]
    pub length: u32,

    pub sort: Option<String>,
    pub desc: Option<bool>,
}

impl LeaderboardQuery {
    fn list(&self) -> ListParams {
        ListParams {
            query: self.query.clone(),
            page: self.page,
            length: self.length,
            sort: self.sort.clone(),
            desc: self.desc,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub count: u64,
    pub stats: Vec<LeaderboardRow>,
}

pub fn routes(state: StatsApiState) -> Router<()> {
    Router::new()
        .route("/api/v1/leaderboard/{type}", get(get_leaderboard))
        .with_state(state)
}

/// Leaderboard of one type, ranked by global rank unless sorted otherwise
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/{type}",
    tag = "leaderboard",
    params(("type" = String, Path, description = "Leaderboard type"), LeaderboardQuery),
    responses(
        (status = 200, description = "Leaderboard page", body = LeaderboardResponse),
        (status = 400, description = "Invalid filter or sort field")
    )
)]
pub async fn get_leaderboard(
    State(state): State<StatsApiState>,
    JsonPath(kind): JsonPath<String>,
    ValidatedQuery(params): ValidatedQuery<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let scoped = EntityQuery::new(EntityKind::Leaderboard)
        .with_scope("server", params.server.as_str())?
        .with_scope("mode", params.mode)?
        .with_scope("relax", params.relax)?
        .with_scope("leaderboard_type", kind.as_str())?;
    let query = params.list().apply(scoped, false)?;

    let page = state
        .repo
        .search_leaderboard(&query)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(LeaderboardResponse {
        count: page.total_count,
        stats: page.items,
    }))
}
