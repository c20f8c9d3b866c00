use diffmap_core::{DiffmapError, Result, SearchHit, SearchProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted search provider for tests. Returns the same fixed hit list on
/// every call (bounded by `max_results`) and counts invocations.
pub struct MockSearch {
    hits: Vec<SearchHit>,
    fail_with: Option<String>,
    calls: AtomicUsize,
    last_max_results: AtomicUsize,
}

impl MockSearch {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_max_results: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every call fails with a search error carrying this message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()), ..Self::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `max_results` bound passed to the most recent call.
    pub fn last_max_results(&self) -> usize {
        self.last_max_results.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_max_results.store(max_results, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(DiffmapError::Search(message.clone()));
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}
