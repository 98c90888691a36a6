pub mod atlantic;
pub mod collider;
pub mod deadline;
pub mod guardian;
pub mod hollywoodreporter;
pub mod indiewire;
pub mod latimes;
pub mod nytimes;
pub mod screendaily;
pub mod slashfilm;
pub mod variety;
pub mod vulture;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use crate::article::{Detail, Teaser};

/// A fetched page handed to a source for parsing.
pub struct Page<'a> {
    pub html: &'a str,
    pub url: &'a Url,
    pub now: NaiveDateTime,
}

/// One publication's layout knowledge.
///
/// Parsing is synchronous: the DOM is built and dropped inside each call,
/// so nothing non-`Send` crosses an await point.
pub trait Source: Send + Sync {
    /// Registry key.
    fn name(&self) -> &str;

    /// Value of the `source` / `sourceIconURL` fields.
    fn label(&self) -> &str {
        self.name()
    }

    /// Host suffixes this source owns.
    fn hosts(&self) -> &[&str];

    /// Section front scraped by default.
    fn default_url(&self) -> &str;

    /// Story cards on a section front.
    fn stories(&self, page: &Page) -> Result<Vec<Teaser>>;

    /// Body and metadata of one article page.
    fn detail(&self, page: &Page) -> Result<Detail>;

    /// `sourceSection` from the article's categories.
    fn section(&self, categories: &[String]) -> String {
        categories.first().cloned().unwrap_or_default()
    }
}

/// A configured source: which adapter, whether it runs, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub enabled: bool,
    pub url: String,
}

/// Holds all known sources. RwLock allows runtime registration + parallel reads.
pub struct SourceRegistry {
    sources: RwLock<BTreeMap<String, Arc<dyn Source>>>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry with every built-in publication.
    pub async fn with_defaults() -> Self {
        let registry = Self::new();
        for source in builtin() {
            registry.register(source).await;
        }
        registry
    }

    pub async fn register(&self, source: Arc<dyn Source>) {
        let name = source.name().to_string();
        self.sources.write().await.insert(name, source);
    }

    pub async fn unregister(&self, name: &str) {
        self.sources.write().await.remove(name);
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Source>> {
        self.sources.read().await.get(name).cloned()
    }

    /// The source owning the URL's host, if any.
    pub async fn for_url(&self, url: &Url) -> Option<Arc<dyn Source>> {
        let host = url.host_str()?.to_ascii_lowercase();
        self.sources
            .read()
            .await
            .values()
            .find(|s| s.hosts().iter().any(|h| host_matches(&host, h)))
            .cloned()
    }

    pub async fn names(&self) -> Vec<String> {
        self.sources.read().await.keys().cloned().collect()
    }
}

/// `www.variety.com` matches `variety.com`; `notvariety.com` does not.
fn host_matches(host: &str, suffix: &str) -> bool {
    host == suffix
        || host
            .strip_suffix(suffix)
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Every built-in publication.
pub fn builtin() -> Vec<Arc<dyn Source>> {
    vec![
        Arc::new(deadline::Deadline) as Arc<dyn Source>,
        Arc::new(variety::Variety),
        Arc::new(hollywoodreporter::HollywoodReporter),
        Arc::new(slashfilm::SlashFilm),
        Arc::new(atlantic::Atlantic),
        Arc::new(nytimes::NyTimes),
        Arc::new(indiewire::IndieWire),
        Arc::new(collider::Collider),
        Arc::new(screendaily::ScreenDaily),
        Arc::new(guardian::Guardian),
        Arc::new(latimes::LaTimes),
        Arc::new(vulture::Vulture),
    ]
}

/// Default source list. Only IndieWire runs out of the box.
pub fn default_entries() -> Vec<SourceEntry> {
    builtin()
        .iter()
        .map(|s| SourceEntry {
            name: s.name().to_string(),
            enabled: s.name() == indiewire::NAME,
            url: s.default_url().to_string(),
        })
        .collect()
}

/// A page stamped at a fixed instant (2026-10-19 12:00).
#[cfg(test)]
pub(crate) fn test_page<'a>(html: &'a str, url: &'a Url) -> Page<'a> {
    Page {
        html,
        url,
        now: chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap_or_default(),
    }
}
