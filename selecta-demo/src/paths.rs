//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "selecta";
const APPLICATION: &str = "selecta-demo";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory for the log file.
///
/// - Linux: `$XDG_CACHE_HOME/selecta-demo` or `~/.cache/selecta-demo`
/// - macOS: `~/Library/Caches/dev.selecta.selecta-demo`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Optional widget configuration, camelCase JSON.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("selecta.json"))
}
