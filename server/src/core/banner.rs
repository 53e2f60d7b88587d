//! Startup banner

use super::config::AppConfig;
use super::constants::APP_NAME;

/// Wildcard bind addresses
fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

/// Base URL shown to the operator
pub(crate) fn display_url(host: &str, port: u16) -> String {
    let host = if is_all_interfaces(host) { "localhost" } else { host };
    format!("http://{}:{}", host, port)
}

/// Print the startup banner with URLs
pub fn print_banner(config: &AppConfig) {
    let base = display_url(&config.server.host, config.server.port);
    const W: usize = 10;

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}/api/v1", "API:", base);
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}/api/openapi.json",
        "OpenAPI:", base
    );
    if config.server.host == "127.0.0.1" || config.server.host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }
    println!(
        "  \x1b[90m➜  {:<W$} {}\x1b[0m",
        "Database:", config.database.backend
    );
    println!();
}
