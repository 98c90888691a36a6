//! Startup banner.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};
use crate::sources::SourceEntry;

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub listen: &'a str,
    pub db: &'a str,
    pub entries: &'a [SourceEntry],
}

/// Comma-separated names of the enabled sources, or `none`.
pub fn enabled_label(entries: &[SourceEntry]) -> String {
    let enabled: Vec<&str> = entries
        .iter()
        .filter(|e| e.enabled)
        .map(|e| e.name.as_str())
        .collect();
    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    }
}

/// Print the startup banner with server info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║           N E W S R E E L             ║
   ║      film news, pulled off the wire   ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   listen    http://{}
   db        {}
   sources   {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.listen,
        info.db,
        enabled_label(info.entries),
    );
}
