#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use newsreel::engine::{ScrapeConfig, ScrapeEngine};
use newsreel::events::EventBus;
use newsreel::fetch::MockFetcher;
use newsreel::sources::{SourceEntry, SourceRegistry};

pub const FRONT: &str = "https://deadline.com/v/film/";
pub const ONE: &str = "https://deadline.com/2026/10/one/";
pub const TWO: &str = "https://deadline.com/2026/10/two/";
pub const THREE: &str = "https://deadline.com/2026/10/three/";

/// 2026-10-19 12:00:00
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// A PMC section front linking to `links`, in order.
pub fn front(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(r#"<h3><a class="c-title__link" href="{href}">Teaser {i}</a></h3>"#)
        })
        .collect();
    format!("<html><body>{items}</body></html>")
}

/// A PMC article page.
pub fn article(title: &str, body: &str) -> String {
    format!(
        r#"<html><body>
            <ul><li class="o-nav__list-item"><a class="c-nav-link">Film</a></li></ul>
            <h1 class="c-title">{title}</h1>
            <p class="pmc-u-margin-tb-00 pmc-u-font-size-14">By Staff</p>
            <time class="pmc-u-color-grey-medium-dark">October 18, 2026 9:00am PT</time>
            <div class="a-content"><p>{body}</p></div>
        </body></html>"#
    )
}

/// Front with three stories, all of which resolve.
pub fn deadline_fetcher() -> MockFetcher {
    MockFetcher::new()
        .page(FRONT, &front(&[ONE, TWO, THREE]))
        .page(ONE, &article("One", "First."))
        .page(TWO, &article("Two", "Second."))
        .page(THREE, &article("Three", "Third."))
}

pub fn entry(name: &str, enabled: bool, url: &str) -> SourceEntry {
    SourceEntry {
        name: name.to_string(),
        enabled,
        url: url.to_string(),
    }
}

pub async fn engine(
    fetcher: MockFetcher,
    entries: Vec<SourceEntry>,
    events: Arc<EventBus>,
) -> ScrapeEngine {
    let sources = Arc::new(SourceRegistry::with_defaults().await);
    let config = ScrapeConfig {
        concurrency: 2,
        fetch_timeout: Duration::from_millis(200),
        entries,
    };
    ScrapeEngine::new(Arc::new(fetcher), sources, events, config).with_clock(fixed_now)
}
