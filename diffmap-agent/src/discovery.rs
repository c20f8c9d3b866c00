use crate::{json, prompts};
use diffmap_core::{
    Competitor, DiffmapError, GenerateContentConfig, Llm, LlmRequest, MAX_SEARCH_RESULTS, Query,
    Result, SearchProvider,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Discovers competitors: one web search derived from the idea, then one
/// model call extracting a structured competitor list from the snippets.
pub struct CompetitorDiscoveryAgent {
    search: Arc<dyn SearchProvider>,
    model: Arc<dyn Llm>,
    max_results: usize,
}

impl CompetitorDiscoveryAgent {
    pub fn new(search: Arc<dyn SearchProvider>, model: Arc<dyn Llm>) -> Self {
        Self { search, model, max_results: MAX_SEARCH_RESULTS }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// An empty competitor list is a valid outcome, not an error. Zero
    /// search hits short-circuit without a model call.
    pub async fn discover(&self, query: &Query) -> Result<Vec<Competitor>> {
        let search_query = prompts::discovery_search_query(query.as_str());
        let hits = self.search.search(&search_query, self.max_results).await?;

        if hits.is_empty() {
            tracing::info!(provider = self.search.name(), "Search returned no results");
            return Ok(Vec::new());
        }

        let req = LlmRequest::from_prompt(prompts::discovery_prompt(query.as_str(), &hits))
            .with_config(GenerateContentConfig { temperature: Some(0.7), ..Default::default() })
            .with_response_schema(prompts::competitor_list_schema());

        let resp = self.model.generate(req).await?;
        let text = resp.text().ok_or_else(|| {
            DiffmapError::MalformedOutput("discovery reply contained no text".to_string())
        })?;

        let raw: Vec<RawCompetitor> = json::parse_json_reply(text)?;

        let mut seen = BTreeSet::new();
        let mut competitors = Vec::new();
        for entry in raw {
            let name = entry.name.trim().to_string();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                continue;
            }
            competitors.push(Competitor {
                name,
                description: entry.description,
                notable_features: entry.notable_features,
                source_urls: entry.source_urls.into_iter().collect(),
            });
        }

        tracing::info!(count = competitors.len(), "Discovered competitors");
        Ok(competitors)
    }
}

#[derive(Debug, Deserialize)]
struct RawCompetitor {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    notable_features: Vec<String>,
    #[serde(default)]
    source_urls: Vec<String>,
}
