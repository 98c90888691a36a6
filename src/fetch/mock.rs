use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use super::Fetcher;

/// Serves canned pages. For tests.
///
/// Unknown URLs answer like a 404. URLs marked with [`MockFetcher::fail`]
/// fail at the transport level, and [`MockFetcher::delay`] slows one URL down.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn delay(mut self, url: &str, by: Duration) -> Self {
        self.delays.insert(url.to_string(), by);
        self
    }

    /// Every URL fetched so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        self.requested.lock().unwrap().push(url.to_string());
        if let Some(by) = self.delays.get(url) {
            tokio::time::sleep(*by).await;
        }
        if self.failing.contains(url) {
            bail!("connection refused: {url}");
        }
        Ok(self.pages.get(url).cloned())
    }
}
