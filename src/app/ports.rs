use async_trait::async_trait;

use crate::error::Result;

/// Retrieves the raw HTML of a document.
#[async_trait]
pub trait DocumentFetcherPort: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
