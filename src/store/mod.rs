pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::article::Article;

pub use sqlite::SqliteStore;

/// Where scraped articles are kept between runs.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert or replace by [`Article::key`]. Returns the number of distinct
    /// keys written; a key repeated in the batch counts once.
    async fn store(&self, articles: &[Article]) -> Result<usize>;
    /// The `limit` most recently stored articles, oldest first.
    async fn history(&self, limit: usize) -> Result<Vec<Article>>;
    /// Articles whose title, subtitle, author or body contains `query`,
    /// ignoring ASCII case.
    async fn recall(&self, query: &str) -> Result<Vec<Article>>;
    async fn count(&self) -> Result<usize>;
    async fn clear(&self) -> Result<()>;
}
