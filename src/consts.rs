//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Some publications refuse requests without a desktop browser agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Article pages fetched in parallel per source.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Per-page fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Stored articles returned by `/articles` when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default database path: `~/.newsreel/newsreel.db`.
/// Single DB for articles and source overrides.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".newsreel")
        .join("newsreel.db")
}
