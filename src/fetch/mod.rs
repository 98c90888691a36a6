pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

/// Retrieves raw HTML. The engine only knows this trait.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// `Ok(None)` when the server answered with a non-success status.
    async fn fetch(&self, url: &str) -> Result<Option<String>>;
}
