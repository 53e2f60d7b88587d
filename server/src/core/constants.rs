// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "AltStats";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".altstats";

/// Text served at `GET /`
pub const API_BANNER: &str = "Akatsuki Alt V4 API";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "altstats.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ALTSTATS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "ALTSTATS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "ALTSTATS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ALTSTATS_LOG";

/// Log filter used when neither `ALTSTATS_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info,altstats=info";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for database backend (sqlite or postgres)
pub const ENV_DATABASE_BACKEND: &str = "ALTSTATS_DATABASE_BACKEND";

/// Environment variable for SQLite database path
pub const ENV_SQLITE_PATH: &str = "ALTSTATS_SQLITE_PATH";

/// Environment variable for PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "ALTSTATS_POSTGRES_URL";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename, placed in the profile folder by default
pub const SQLITE_DB_FILENAME: &str = "altstats.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 8;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

// =============================================================================
// PostgreSQL Database
// =============================================================================

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// API
// =============================================================================

/// Default `length` of list endpoints
pub const DEFAULT_PAGE_LENGTH: u32 = 100;

/// Message of every 404 response
pub const NOT_FOUND_MESSAGE: &str = "Item not found";

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
