use crate::{Result, types::SearchHit};
use async_trait::async_trait;

/// A hosted web-search capability. Returns ordered (title, snippet, url)
/// results; never reimplemented locally.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}
