//! SQLite schema definitions
//!
//! The API only reads. Tables are created if missing so a fresh database file
//! serves empty results; an importer fills them.

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Metadata
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    server TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    username TEXT NOT NULL,
    country TEXT NOT NULL,
    clan_id INTEGER,
    registered_on DATE NOT NULL,
    latest_activity DATE NOT NULL,
    restricted BOOLEAN NOT NULL DEFAULT 0,
    PRIMARY KEY (server, user_id)
);
CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

CREATE TABLE IF NOT EXISTS clans (
    server TEXT NOT NULL,
    clan_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    tag TEXT NOT NULL,
    owner_id INTEGER NOT NULL,
    member_count INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (server, clan_id)
);

CREATE TABLE IF NOT EXISTS beatmapsets (
    beatmapset_id INTEGER PRIMARY KEY,
    artist TEXT NOT NULL,
    title TEXT NOT NULL,
    creator TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT '',
    last_update DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS beatmaps (
    beatmap_id INTEGER PRIMARY KEY,
    beatmapset_id INTEGER NOT NULL,
    artist TEXT NOT NULL,
    title TEXT NOT NULL,
    version TEXT NOT NULL,
    mode INTEGER NOT NULL,
    status INTEGER NOT NULL,
    stars REAL NOT NULL,
    length INTEGER NOT NULL,
    bpm REAL NOT NULL,
    ar REAL NOT NULL,
    od REAL NOT NULL,
    cs REAL NOT NULL,
    hp REAL NOT NULL,
    max_combo INTEGER NOT NULL,
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
    beatmapset_id INTEGER NOT NULL,
    PRIMARY KEY (tag, beatmapset_id)
);

-- =============================================================================
-- Scores and daily snapshots
-- =============================================================================
CREATE TABLE IF NOT EXISTS scores (
    server TEXT NOT NULL,
    score_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    beatmap_id INTEGER NOT NULL,
    mode INTEGER NOT NULL,
    relax INTEGER NOT NULL,
    score INTEGER NOT NULL,
    accuracy REAL NOT NULL,
    pp REAL NOT NULL,
    max_combo INTEGER NOT NULL,
    mods INTEGER NOT NULL,
    rank TEXT NOT NULL,
    completed INTEGER NOT NULL,
    date DATE NOT NULL,
    PRIMARY KEY (server, score_id)
);
CREATE INDEX IF NOT EXISTS idx_scores_user ON scores(server, user_id, mode, relax);

CREATE TABLE IF NOT EXISTS user_stats (
    server TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    mode INTEGER NOT NULL,
    relax INTEGER NOT NULL,
    date DATE NOT NULL,
    ranked_score INTEGER NOT NULL,
    total_score INTEGER NOT NULL,
    play_count INTEGER NOT NULL,
    play_time INTEGER NOT NULL,
    accuracy REAL NOT NULL,
    pp REAL NOT NULL,
    global_rank INTEGER NOT NULL,
    country_rank INTEGER NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, date)
);

CREATE TABLE IF NOT EXISTS leaderboard (
    server TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    mode INTEGER NOT NULL,
    relax INTEGER NOT NULL,
    leaderboard_type TEXT NOT NULL,
    date DATE NOT NULL,
    country TEXT NOT NULL,
    ranked_score INTEGER NOT NULL,
    total_score INTEGER NOT NULL,
    play_count INTEGER NOT NULL,
    accuracy REAL NOT NULL,
    pp REAL NOT NULL,
    global_rank INTEGER NOT NULL,
    country_rank INTEGER NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, leaderboard_type)
);
CREATE INDEX IF NOT EXISTS idx_leaderboard_rank
    ON leaderboard(server, mode, relax, leaderboard_type, global_rank);

CREATE TABLE IF NOT EXISTS first_places (
    server TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    mode INTEGER NOT NULL,
    relax INTEGER NOT NULL,
    beatmap_id INTEGER NOT NULL,
    date DATE NOT NULL,
    score_id INTEGER NOT NULL,
    score INTEGER NOT NULL,
    accuracy REAL NOT NULL,
    pp REAL NOT NULL,
    PRIMARY KEY (server, user_id, mode, relax, beatmap_id, date)
);
CREATE INDEX IF NOT EXISTS idx_first_places_date
    ON first_places(server, user_id, mode, relax, date);
"#;
