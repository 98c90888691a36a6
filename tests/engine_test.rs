mod common;

use std::sync::Arc;
use std::time::Duration;

use newsreel::engine::Engine;
use newsreel::events::{Event, EventBus};
use newsreel::fetch::MockFetcher;
use tokio::sync::broadcast;

use common::*;

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn process_merges_front_and_article_pages() {
    let engine = engine(deadline_fetcher(), vec![], Arc::new(EventBus::default())).await;

    let articles = engine.process(FRONT).await.unwrap();
    assert_eq!(articles.len(), 3);

    let first = &articles[0];
    assert_eq!(first.source, "deadline");
    assert_eq!(first.source_section, "Film");
    assert_eq!(first.title, "One");
    assert_eq!(first.content, vec!["First."]);
    assert_eq!(first.author, "By Staff");
    assert_eq!(first.url_article, ONE);
    assert_eq!(first.published_date, "2026-10-18");
    assert_eq!(first.published_time, "09:00:00");
    assert_eq!(first.captured_date, "2026-10-19");
    assert_eq!(first.captured_time, "12:00:00");
}

#[tokio::test]
async fn output_follows_front_order_even_when_pages_finish_out_of_order() {
    let fetcher = deadline_fetcher().delay(ONE, Duration::from_millis(80));
    let engine = engine(fetcher, vec![], Arc::new(EventBus::default())).await;

    let titles: Vec<_> = engine
        .process(FRONT)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
}

#[tokio::test]
async fn duplicate_links_are_fetched_once() {
    let fetcher = MockFetcher::new()
        .page(FRONT, &front(&[ONE, TWO, ONE]))
        .page(ONE, &article("One", "First."))
        .page(TWO, &article("Two", "Second."));
    let fetcher = Arc::new(fetcher);
    let sources = Arc::new(newsreel::sources::SourceRegistry::with_defaults().await);
    let engine = newsreel::engine::ScrapeEngine::new(
        fetcher.clone(),
        sources,
        Arc::new(EventBus::default()),
        newsreel::engine::ScrapeConfig::default(),
    );

    let articles = engine.process(FRONT).await.unwrap();
    assert_eq!(articles.len(), 2);
    let hits = fetcher.requested().iter().filter(|u| *u == ONE).count();
    assert_eq!(hits, 1);
}

#[tokio::test]
async fn unusable_article_pages_are_dropped() {
    let fetcher = MockFetcher::new()
        .page(FRONT, &front(&[ONE, TWO, THREE]))
        .page(ONE, &article("One", "First."))
        .fail(TWO)
        .page(THREE, &article("Three", "Third."))
        .delay(THREE, Duration::from_secs(2));
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let engine = engine(fetcher, vec![], events).await;

    let articles = engine.process(FRONT).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].url_article, ONE);

    let failed: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::PageFailed { url, .. } => Some(url),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![TWO.to_string(), THREE.to_string()]);
}

#[tokio::test]
async fn missing_article_page_is_dropped() {
    let fetcher = MockFetcher::new()
        .page(FRONT, &front(&[ONE, TWO]))
        .page(TWO, &article("Two", "Second."));
    let engine = engine(fetcher, vec![], Arc::new(EventBus::default())).await;

    let articles = engine.process(FRONT).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Two");
}

#[tokio::test]
async fn front_page_not_found_yields_nothing() {
    let engine = engine(MockFetcher::new(), vec![], Arc::new(EventBus::default())).await;
    assert!(engine.process(FRONT).await.unwrap().is_empty());
}

#[tokio::test]
async fn front_page_transport_error_propagates() {
    let engine = engine(
        MockFetcher::new().fail(FRONT),
        vec![],
        Arc::new(EventBus::default()),
    )
    .await;
    assert!(engine.process(FRONT).await.is_err());
}

#[tokio::test]
async fn invalid_url_is_an_error() {
    let engine = engine(MockFetcher::new(), vec![], Arc::new(EventBus::default())).await;
    let err = engine.process("not a url").await.unwrap_err();
    assert!(err.to_string().contains("invalid URL"));
}

#[tokio::test]
async fn unknown_host_uses_generic_layout() {
    let front_url = "https://films.example.org/latest/";
    let story = "https://films.example.org/2026/10/story/";
    let fetcher = MockFetcher::new()
        .page(front_url, &front(&["/2026/10/story/"]))
        .page(story, &article("Story", "Body."));
    let engine = engine(fetcher, vec![], Arc::new(EventBus::default())).await;

    let articles = engine.process(front_url).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "deadline");
    assert_eq!(articles[0].url_article, story);
}

#[tokio::test]
async fn run_scrapes_enabled_sources_only() {
    let entries = vec![
        entry("deadline", true, FRONT),
        entry("variety", false, "https://variety.com/v/film/"),
    ];
    let engine = engine(deadline_fetcher(), entries, Arc::new(EventBus::default())).await;

    let articles = engine.run().await.unwrap();
    assert_eq!(articles.len(), 3);
    assert!(articles.iter().all(|a| a.source == "deadline"));
}

#[tokio::test]
async fn run_keeps_entry_order_when_first_source_is_slower() {
    let tv_front = "https://deadline.com/v/tv/";
    let tv_story = "https://deadline.com/2026/10/tv-story/";
    let entries = vec![entry("deadline", true, FRONT), entry("deadline", true, tv_front)];
    let fetcher = deadline_fetcher()
        .delay(FRONT, Duration::from_millis(100))
        .page(tv_front, &front(&[tv_story]))
        .page(tv_story, &article("TV", "Small screen."));
    let engine = engine(fetcher, entries, Arc::new(EventBus::default())).await;

    let titles: Vec<_> = engine
        .run()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Three", "TV"]);
}

#[tokio::test]
async fn failing_source_does_not_abort_run() {
    let entries = vec![
        entry("variety", true, "https://variety.com/v/film/"),
        entry("deadline", true, FRONT),
        entry("nosuchsource", true, "https://example.org/"),
    ];
    let fetcher = deadline_fetcher().fail("https://variety.com/v/film/");
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let engine = engine(fetcher, entries, events).await;

    let articles = engine.run().await.unwrap();
    assert_eq!(articles.len(), 3);

    let mut failed: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::SourceFailed { source, .. } => Some(source),
            _ => None,
        })
        .collect();
    failed.sort();
    assert_eq!(failed, vec!["nosuchsource", "variety"]);
}

#[tokio::test]
async fn progress_events_bracket_a_source() {
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let engine = engine(deadline_fetcher(), vec![], events).await;
    engine.process(FRONT).await.unwrap();

    let seen = drain(&mut rx);
    assert_eq!(
        seen.first(),
        Some(&Event::SourceStarted {
            source: "deadline".to_string(),
            url: FRONT.to_string(),
        })
    );
    assert_eq!(
        seen.last(),
        Some(&Event::SourceFinished {
            source: "deadline".to_string(),
            articles: 3,
        })
    );
    let scraped = seen
        .iter()
        .filter(|e| matches!(e, Event::ArticleScraped { .. }))
        .count();
    assert_eq!(scraped, 3);
}
