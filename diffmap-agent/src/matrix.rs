use crate::{json, prompts};
use diffmap_core::{
    Competitor, DiffmapError, FeatureMatrix, GenerateContentConfig, Llm, LlmRequest, Presence,
    Result,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Builds the competitor × feature presence matrix with a single model
/// call. Enforces the no-orphan-keys invariant against the competitor list.
pub struct FeatureMatrixBuilderAgent {
    model: Arc<dyn Llm>,
}

impl FeatureMatrixBuilderAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self { model }
    }

    pub async fn build(&self, competitors: &[Competitor]) -> Result<FeatureMatrix> {
        if competitors.is_empty() {
            return Ok(FeatureMatrix::new());
        }

        let req = LlmRequest::from_prompt(prompts::matrix_prompt(competitors))
            .with_config(GenerateContentConfig { temperature: Some(0.7), ..Default::default() });

        let resp = self.model.generate(req).await?;
        let text = resp.text().ok_or_else(|| {
            DiffmapError::MalformedOutput("matrix reply contained no text".to_string())
        })?;

        let raw: RawMatrix = json::parse_json_reply(text)?;

        let mut matrix = FeatureMatrix::new();
        for (competitor, row) in raw.matrix {
            for (feature, presence) in row {
                matrix.insert(competitor.clone(), feature, presence);
            }
        }

        let known: BTreeSet<String> = competitors.iter().map(|c| c.name.clone()).collect();
        let orphans = matrix.retain_competitors(&known);
        if !orphans.is_empty() {
            tracing::warn!(?orphans, "Dropped matrix rows for unknown competitors");
        }

        // Every competitor gets a row even when the model skipped it.
        for competitor in competitors {
            matrix.ensure_row(&competitor.name);
        }

        Ok(matrix)
    }
}

// Replies may also carry a top-level feature list; the matrix is the
// source of truth, so unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawMatrix {
    #[serde(default)]
    matrix: BTreeMap<String, BTreeMap<String, Presence>>,
}
