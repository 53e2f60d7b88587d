//! PostgreSQL schema definitions
//!
//! The API only reads. Tables are created if missing so an empty database serves
//! empty results; an importer fills them.

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Metadata
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    server TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    username TEXT NOT NULL,
    country TEXT NOT NULL,
    clan_id BIGINT,
    registered_on DATE NOT NULL,
    latest_activity DATE NOT NULL,
    restricted BOOLEAN NOT NULL DEFAULT FALSE,
    PRIMARY KEY (server, user_id)
);
CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

CREATE TABLE IF NOT EXISTS clans (
    server TEXT NOT NULL,
    clan_id BIGINT NOT NULL,
    name TEXT NOT NULL,
    tag TEXT NOT NULL,
    owner_id BIGINT NOT NULL,
    member_count BIGINT NOT NULL DEFAULT 0,
    PRIMARY KEY (server, clan_id)
);

CREATE TABLE IF NOT EXISTS beatmapsets (
    beatmapset_id BIGINT PRIMARY KEY,
    artist TEXT NOT NULL,
    title TEXT NOT NULL,
    creator TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT '',
    last_update DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS beatmaps (
    beatmap_id BIGINT PRIMARY KEY,
    beatmapset_id BIGINT NOT NULL,
    artist TEXT NOT NULL,
    title TEXT NOT NULL,
    version TEXT NOT NULL,
    mode BIGINT NOT NULL,
    status BIGINT NOT NULL,
    stars DOUBLE PRECISION NOT NULL,
    length BIGINT NOT NULL,
    bpm DOUBLE PRECISION NOT NULL,
    ar DOUBLE PRECISION NOT NULL,
    od DOUBLE PRECISION NOT NULL,
    cs DOUBLE PRECISION NOT NULL,
    hp DOUBLE PRECISION NOT NULL,
    max_combo BIGINT NOT NULL,
    last_update DATE NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_beatmaps_set ON beatmaps(beatmapset_id);

CREATE TABLE IF NOT EXISTS beatmap_packs (
    tag TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    created_on DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS beatmap_pack_entries (
    tag TEXT NOT NULL,
    beatmapset_id BIGINT NOT NULL,
    PRIMARY KEY (tag, beatmapset_id)
);

-- =============================================================================
-- Scores and daily snapshots
-- =============================================================================
CREATE TABLE IF NOT EXISTS scores (
    server TEXT NOT NULL,
    score_id BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    beatmap_id BIGINT NOT NULL,
    mode BIGINT NOT NULL,
    relax BIGINT NOT NULL,
    score BIGINT NOT NULL,
    accuracy DOUBLE PRECISION NOT NULL,
    pp DOUBLE PRECISION NOT NULL,
    max_combo BIGINT NOT NULL,
    mods BIGINT NOT NULL,
    rank TEXT NOT NULL,
    completed BIGINT NOT NULL,
    date DATE NOT NULL,
    PRIMARY KEY (server, score_id)
);
CREATE INDEX IF NOT EXISTS idx_scores_user ON scores(server, user_id, mode, relax);

CREATE TABLE IF NOT EXISTS user_stats (
    server TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    mode BIGINT NOT NULL,
    relax BIGINT NOT NULL,
    date DATE NOT NULL,
    ranked_score BIGINT NOT NULL,
    total_score BIGINT NOT NULL,
    play_count BIGINT NOT NULL,
    play_time BIGINT NOT NULL,
    accuracy DOUBLE PRECISION NOT NULL,
    pp DOUBLE PRECISION NOT NULL,
    global_rank BIGINT NOT NULL,
    country_rank BIGINT NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, date)
);

CREATE TABLE IF NOT EXISTS leaderboard (
    server TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    mode BIGINT NOT NULL,
    relax BIGINT NOT NULL,
    leaderboard_type TEXT NOT NULL,
    date DATE NOT NULL,
    country TEXT NOT NULL,
    ranked_score BIGINT NOT NULL,
    total_score BIGINT NOT NULL,
    play_count BIGINT NOT NULL,
    accuracy DOUBLE PRECISION NOT NULL,
    pp DOUBLE PRECISION NOT NULL,
    global_rank BIGINT NOT NULL,
    country_rank BIGINT NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, leaderboard_type)
);
CREATE INDEX IF NOT EXISTS idx_leaderboard_rank
    ON leaderboard(server, mode, relax, leaderboard_type, global_rank);

CREATE TABLE IF NOT EXISTS first_places (
    server TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    mode BIGINT NOT NULL,
    relax BIGINT NOT NULL,
    beatmap_id BIGINT NOT NULL,
    date DATE NOT NULL,
    score_id BIGINT NOT NULL,
    score BIGINT NOT NULL,
    accuracy DOUBLE PRECISION NOT NULL,
    pp DOUBLE PRECISION NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, beatmap_id, date)
);
CREATE INDEX IF NOT EXISTS idx_first_places_date
    ON first_places(server, user_id, mode, relax, date);
"#;
