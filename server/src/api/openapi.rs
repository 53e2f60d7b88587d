//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{beatmaps, clans, health, leaderboard, scores, users};
use crate::data::types::{
    BeatmapPackRow, BeatmapRow, BeatmapsetRow, ClanRow, FirstPlaceRow, LeaderboardRow,
    PackCompletion, ScoreRow, StatsRow, UserRow,
};
use crate::domain::first_places::DiffMode;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AltStats API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Read-only access to scores, users, beatmaps, clans and leaderboards.\n\n\
            Search endpoints take a `query` filter: comma-separated `field op value` clauses \
            joined with AND, where `op` is one of `=`, `!=`, `>`, `>=`, `<`, `<=`."
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "Users, stats snapshots and first places"),
        (name = "beatmaps", description = "Beatmaps, beatmapsets and packs"),
        (name = "scores", description = "Score lookup and search"),
        (name = "clans", description = "Clan lookup and search"),
        (name = "leaderboard", description = "Ranked leaderboards")
    ),
    paths(
        health::health,
        users::get_user,
        users::search_users,
        users::get_user_stats,
        users::list_user_stat_dates,
        users::get_first_places,
        beatmaps::get_beatmap,
        beatmaps::search_beatmaps,
        beatmaps::get_beatmapset,
        beatmaps::get_beatmap_pack,
        beatmaps::get_pack_completion,
        scores::get_score,
        scores::search_scores,
        clans::get_clan,
        clans::search_clans,
        leaderboard::get_leaderboard,
    ),
    components(schemas(
        health::HealthResponse,
        // Rows
        UserRow,
        ClanRow,
        BeatmapRow,
        BeatmapsetRow,
        BeatmapPackRow,
        ScoreRow,
        StatsRow,
        LeaderboardRow,
        FirstPlaceRow,
        PackCompletion,
        DiffMode,
        // Responses
        users::types::UserListResponse,
        users::types::StatDatesResponse,
        users::types::FirstPlacesResponse,
        beatmaps::types::BeatmapListResponse,
        beatmaps::types::BeatmapsetDetail,
        scores::ScoreListResponse,
        clans::ClanListResponse,
        leaderboard::LeaderboardResponse,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AltStats API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({ url: "/api/openapi.json", dom_id: '#swagger-ui' });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/health",
            "/api/v1/user",
            "/api/v1/user/first_places",
            "/api/v1/beatmap/pack/{tag}/completion",
            "/api/v1/leaderboard/{type}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
        assert_eq!(doc.paths.paths.len(), 16);
    }
}
