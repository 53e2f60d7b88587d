//! User API endpoints

pub mod types;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ListParams, LookupParams};
use crate::data::find_one;
use crate::data::types::{StatsRow, UserRow};
use crate::domain::first_places::{FirstPlaceSnapshots, diff_snapshots};
use crate::domain::query::{EntityKind, EntityQuery, MAX_SCORE_PAGE_LENGTH, PageRequest, UserModeKey};

use super::StatsApiState;
use types::{
    FirstPlacesQuery, FirstPlacesResponse, StatDatesResponse, StatsQuery, UserListResponse,
};

/// Build User API routes
pub fn routes(state: StatsApiState) -> Router<()> {
    Router::new()
        .route("/api/v1/user", get(get_user))
        .route("/api/v1/user/search", get(search_users))
        .route("/api/v1/user/stats", get(get_user_stats))
        .route("/api/v1/user/stats/all", get(list_user_stat_dates))
        .route("/api/v1/user/first_places", get(get_first_places))
        .with_state(state)
}

/// Get a user by server and id
#[utoipa::path(
    get,
    path = "/api/v1/user",
    tag = "users",
    params(LookupParams),
    responses(
        (status = 200, description = "User", body = UserRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_user(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<LookupParams>,
) -> Result<Json<UserRow>, ApiError> {
    let query = params.query(EntityKind::User)?;
    find_one(state.repo.search_users(&query))
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Search users with a filter expression
#[utoipa::path(
    get,
    path = "/api/v1/user/search",
    tag = "users",
    params(ListParams),
    responses(
        (status = 200, description = "Matching users", body = UserListResponse),
        (status = 400, description = "Invalid filter or sort field")
    )
)]
pub async fn search_users(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<UserListResponse>, ApiError> {
    let query = params.apply(EntityQuery::new(EntityKind::User), false)?;
    let page = state
        .repo
        .search_users(&query)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(UserListResponse {
        count: page.total_count,
        users: page.items,
    }))
}

/// Stats snapshot of a user on one date
#[utoipa::path(
    get,
    path = "/api/v1/user/stats",
    tag = "users",
    params(StatsQuery),
    responses(
        (status = 200, description = "Stats snapshot", body = StatsRow),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_user_stats(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<StatsQuery>,
) -> Result<Json<StatsRow>, ApiError> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let query = params
        .key()
        .query(EntityKind::Stats)?
        .with_scope("date", date)?
        .single();
    find_one(state.repo.search_stats(&query))
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Every date with a stats snapshot for the key
#[utoipa::path(
    get,
    path = "/api/v1/user/stats/all",
    tag = "users",
    params(UserModeKey),
    responses(
        (status = 200, description = "Snapshot dates", body = StatDatesResponse)
    )
)]
pub async fn list_user_stat_dates(
    State(state): State<StatsApiState>,
    ValidatedQuery(key): ValidatedQuery<UserModeKey>,
) -> Result<Json<StatDatesResponse>, ApiError> {
    let page = state
        .repo
        .search_stats(&key.query(EntityKind::Stats)?)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(StatDatesResponse {
        total: page.total_count,
        stats: page.items.into_iter().map(|row| row.date).collect(),
    }))
}

/// First places of a user, or those gained or lost since the previous snapshot
#[utoipa::path(
    get,
    path = "/api/v1/user/first_places",
    tag = "users",
    params(FirstPlacesQuery),
    responses(
        (status = 200, description = "First place scores", body = FirstPlacesResponse)
    )
)]
pub async fn get_first_places(
    State(state): State<StatsApiState>,
    ValidatedQuery(params): ValidatedQuery<FirstPlacesQuery>,
) -> Result<Json<FirstPlacesResponse>, ApiError> {
    let key = params.key();
    let source = FirstPlaceSnapshots::new(state.repo.as_ref(), &key);
    let diff = diff_snapshots(&source, params.kind, params.date).await?;

    let page = PageRequest::new(params.page, params.length)
        .clamp(MAX_SCORE_PAGE_LENGTH)
        .paginate(diff.entries);

    tracing::debug!(
        user_id = key.id,
        kind = ?params.kind,
        date = ?diff.date,
        total = page.total_count,
        "First places resolved"
    );

    Ok(Json(FirstPlacesResponse {
        date: diff.date,
        count: page.total_count,
        scores: page.items,
    }))
}
