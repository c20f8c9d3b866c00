use diffmap_core::{
    DiffmapError, Result, RetryConfig, SearchHit, SearchProvider, execute_with_retry,
    is_transient_error,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SEARCH_URL: &str = "https://api.tavily.com/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tavily search client. Advanced depth, bounded result count, single
/// retry on transient failure.
pub struct TavilySearch {
    http: reqwest::Client,
    api_key: String,
    search_depth: String,
    retry: RetryConfig,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DiffmapError::Search(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            search_depth: "advanced".to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn search_once(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            search_depth: &self.search_depth,
            max_results,
        };

        let response = self
            .http
            .post(SEARCH_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| DiffmapError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DiffmapError::Search(format!("HTTP {status}: {detail}")));
        }

        let parsed: SearchResponse =
            response.json().await.map_err(|e| DiffmapError::Search(e.to_string()))?;

        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchHit { title: r.title, snippet: r.content, url: r.url })
            .collect())
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        tracing::debug!(query = %query, max_results, "Calling Tavily search");
        execute_with_retry(&self.retry, is_transient_error, || {
            self.search_once(query, max_results)
        })
        .await
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}
