use clap::Parser;

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_DATABASE_BACKEND, ENV_HOST, ENV_PORT, ENV_POSTGRES_URL, ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "altstats")]
#[command(version, about = "Read-only statistics API", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Database backend (sqlite, postgres)
    #[arg(long, env = ENV_DATABASE_BACKEND, value_parser = parse_database_backend)]
    pub database_backend: Option<DatabaseBackend>,

    /// SQLite database file
    #[arg(long, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, env = ENV_POSTGRES_URL, hide_env_values = true)]
    pub postgres_url: Option<String>,
}

fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "postgres" | "postgresql" | "pg" => Ok(DatabaseBackend::Postgres),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid: sqlite, postgres",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub database_backend: Option<DatabaseBackend>,
    pub sqlite_path: Option<PathBuf>,
    pub postgres_url: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            database_backend: cli.database_backend,
            sqlite_path: cli.sqlite_path,
            postgres_url: cli.postgres_url,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_backend() {
        assert_eq!(
            parse_database_backend("SQLite").unwrap(),
            DatabaseBackend::Sqlite
        );
        assert_eq!(
            parse_database_backend("pg").unwrap(),
            DatabaseBackend::Postgres
        );
        assert!(parse_database_backend("duckdb").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "altstats",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--database-backend",
            "postgres",
            "--postgres-url",
            "postgres://localhost/stats",
        ])
        .unwrap();
        let config = CliConfig::from(cli);
        assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.database_backend, Some(DatabaseBackend::Postgres));
        assert_eq!(
            config.postgres_url.as_deref(),
            Some("postgres://localhost/stats")
        );
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["altstats", "--port", "not-a-port"]).is_err());
    }
}
