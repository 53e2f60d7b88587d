//! Path helpers for config and database locations

use std::path::PathBuf;

/// Resolve a user-supplied path to an absolute one.
///
/// `~` and `~/...` resolve against the home directory. Anything still
/// relative afterwards is joined onto the working directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return current_dir();
    }

    let home_relative = match path {
        "~" => dirs::home_dir(),
        _ => path
            .strip_prefix("~/")
            .and_then(|rest| dirs::home_dir().map(|home| home.join(rest))),
    };
    let expanded = home_relative.unwrap_or_else(|| PathBuf::from(path));

    if expanded.is_absolute() {
        expanded
    } else {
        current_dir().join(expanded)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
