pub mod scrape;

use anyhow::Result;
use async_trait::async_trait;

use crate::article::Article;

pub use scrape::{ScrapeConfig, ScrapeEngine};

/// The outermost boundary. The server and the CLI only know this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Scrape one section front, routed to a source by host.
    async fn process(&self, url: &str) -> Result<Vec<Article>>;

    /// Scrape every enabled source.
    async fn run(&self) -> Result<Vec<Article>>;
}
