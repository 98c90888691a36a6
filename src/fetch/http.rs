use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::Fetcher;
use crate::consts::DEFAULT_USER_AGENT;

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        tracing::debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("failed to retrieve the page: {}", status.as_u16());
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))?;
        Ok(Some(body))
    }
}
