use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::Engine;
use crate::article::{Article, Detail, Story, Teaser};
use crate::consts::{DEFAULT_CONCURRENCY, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::dates;
use crate::events::{Event, EventBus};
use crate::fetch::Fetcher;
use crate::sources::{Page, Source, SourceEntry, SourceRegistry, deadline};

pub struct ScrapeConfig {
    /// Article pages fetched at once, per source.
    pub concurrency: usize,
    pub fetch_timeout: Duration,
    pub entries: Vec<SourceEntry>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            entries: Vec::new(),
        }
    }
}

/// Front page, then article pages, then merged articles.
pub struct ScrapeEngine {
    fetcher: Arc<dyn Fetcher>,
    sources: Arc<SourceRegistry>,
    events: Arc<EventBus>,
    config: ScrapeConfig,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl ScrapeEngine {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sources: Arc<SourceRegistry>,
        events: Arc<EventBus>,
        config: ScrapeConfig,
    ) -> Self {
        Self {
            fetcher,
            sources,
            events,
            config,
            clock: local_now,
        }
    }

    /// Replace the wall clock. Captured stamps and date-keyed layouts use it.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    async fn scrape(&self, source: Arc<dyn Source>, url: Url) -> Result<Vec<Article>> {
        let now = (self.clock)();
        let captured = dates::captured(now);
        self.events.emit(Event::SourceStarted {
            source: source.name().to_string(),
            url: url.to_string(),
        });

        let Some(html) = self.fetcher.fetch(url.as_str()).await? else {
            self.finish(source.as_ref(), 0);
            return Ok(Vec::new());
        };

        let mut teasers = source.stories(&Page {
            html: &html,
            url: &url,
            now,
        })?;
        let mut seen = HashSet::new();
        teasers.retain(|t| seen.insert(t.link.clone()));
        tracing::info!(source = source.name(), stories = teasers.len(), "found stories");

        let adapter = source.as_ref();
        let captured = &captured;
        let articles: Vec<Article> = stream::iter(teasers)
            .map(move |teaser| self.article(adapter, teaser, now, captured))
            .buffered(self.config.concurrency.max(1))
            .filter_map(|article| async move { article })
            .collect()
            .await;

        self.finish(source.as_ref(), articles.len());
        Ok(articles)
    }

    fn finish(&self, source: &dyn Source, articles: usize) {
        tracing::info!(source = source.name(), articles, "source finished");
        self.events.emit(Event::SourceFinished {
            source: source.name().to_string(),
            articles,
        });
    }

    /// One article, or `None` when its page is unusable.
    async fn article(
        &self,
        source: &dyn Source,
        teaser: Teaser,
        now: NaiveDateTime,
        captured: &(String, String),
    ) -> Option<Article> {
        match self.detail(source, &teaser.link, now).await {
            Ok(detail) => {
                self.events.emit(Event::ArticleScraped {
                    source: source.name().to_string(),
                    url: teaser.link.clone(),
                });
                Some(Article::assemble(
                    source,
                    Story::merge(teaser, detail),
                    captured,
                ))
            }
            Err(e) => {
                tracing::warn!(url = %teaser.link, "skipping article: {e:#}");
                self.events.emit(Event::PageFailed {
                    url: teaser.link,
                    reason: format!("{e:#}"),
                });
                None
            }
        }
    }

    async fn detail(&self, source: &dyn Source, link: &str, now: NaiveDateTime) -> Result<Detail> {
        let url = Url::parse(link).with_context(|| format!("invalid article link {link}"))?;
        let html = match tokio::time::timeout(self.config.fetch_timeout, self.fetcher.fetch(link))
            .await
        {
            Ok(result) => result?,
            Err(_) => bail!("timed out after {:?}", self.config.fetch_timeout),
        };
        let Some(html) = html else {
            bail!("page not available");
        };
        source.detail(&Page {
            html: &html,
            url: &url,
            now,
        })
    }
}

#[async_trait]
impl Engine for ScrapeEngine {
    async fn process(&self, url: &str) -> Result<Vec<Article>> {
        let url = Url::parse(url.trim()).with_context(|| format!("invalid URL {url:?}"))?;
        let source = match self.sources.for_url(&url).await {
            Some(source) => source,
            None => {
                tracing::info!(url = %url, "unknown host, using the generic layout");
                self.sources
                    .get(deadline::NAME)
                    .await
                    .context("no generic source registered")?
            }
        };
        self.scrape(source, url).await
    }

    async fn run(&self) -> Result<Vec<Article>> {
        let runs = self
            .config
            .entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| async move {
                let outcome = match self.sources.get(&entry.name).await {
                    Some(source) => match Url::parse(&entry.url) {
                        Ok(url) => self.scrape(source, url).await,
                        Err(e) => Err(e).with_context(|| format!("invalid URL {:?}", entry.url)),
                    },
                    None => Err(anyhow::anyhow!("unknown source")),
                };
                outcome.unwrap_or_else(|e| {
                    tracing::error!(source = %entry.name, "source failed: {e:#}");
                    self.events.emit(Event::SourceFailed {
                        source: entry.name.clone(),
                        reason: format!("{e:#}"),
                    });
                    Vec::new()
                })
            });

        let per_source = futures::future::join_all(runs).await;
        Ok(per_source.into_iter().flatten().collect())
    }
}
