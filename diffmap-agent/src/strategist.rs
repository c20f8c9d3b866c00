use crate::{json, prompts};
use diffmap_core::{
    Competitor, DifferentiationReport, DiffmapError, FeatureMatrix, GenerateContentConfig, Llm,
    LlmRequest, Query, Result,
};
use std::sync::Arc;

/// Produces the differentiation report from the competitor list and the
/// feature matrix in a single model call. Pure transformation otherwise.
pub struct DifferentiationStrategistAgent {
    model: Arc<dyn Llm>,
}

impl DifferentiationStrategistAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self { model }
    }

    pub async fn generate(
        &self,
        query: &Query,
        competitors: &[Competitor],
        matrix: &FeatureMatrix,
    ) -> Result<DifferentiationReport> {
        let req =
            LlmRequest::from_prompt(prompts::strategist_prompt(query.as_str(), competitors, matrix))
                .with_config(GenerateContentConfig {
                    temperature: Some(0.7),
                    ..Default::default()
                })
                .with_response_schema(prompts::report_schema());

        let resp = self.model.generate(req).await?;
        let text = resp.text().ok_or_else(|| {
            DiffmapError::MalformedOutput("strategist reply contained no text".to_string())
        })?;

        let report: DifferentiationReport = json::parse_json_reply(text)?;
        if report.positioning_narrative.trim().is_empty() {
            return Err(DiffmapError::MalformedOutput(
                "strategist reply had an empty positioning narrative".to_string(),
            ));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffmap_model::MockLlm;

    fn inputs() -> (Query, Vec<Competitor>, FeatureMatrix) {
        let query = Query::new("a widget marketplace").unwrap();
        let competitors = vec![Competitor::new("Acme", "Widget platform")];
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Acme", "api", diffmap_core::Presence::Flag(true));
        (query, competitors, matrix)
    }

    #[tokio::test]
    async fn test_generate_report() {
        let model = Arc::new(MockLlm::new("mock").with_text(
            r#"{
                "gaps": ["no self-serve tier"],
                "opportunities": ["target SMBs"],
                "positioning_narrative": "Go down-market with transparent pricing."
            }"#,
        ));

        let (query, competitors, matrix) = inputs();
        let agent = DifferentiationStrategistAgent::new(model);
        let report = agent.generate(&query, &competitors, &matrix).await.unwrap();

        assert_eq!(report.gaps, vec!["no self-serve tier"]);
        assert_eq!(report.positioning_narrative, "Go down-market with transparent pricing.");
    }

    #[tokio::test]
    async fn test_empty_narrative_is_malformed() {
        let model =
            Arc::new(MockLlm::new("mock").with_text(r#"{"positioning_narrative": "  "}"#));

        let (query, competitors, matrix) = inputs();
        let agent = DifferentiationStrategistAgent::new(model);
        let err = agent.generate(&query, &competitors, &matrix).await.unwrap_err();

        assert!(matches!(err, DiffmapError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model =
            Arc::new(MockLlm::new("mock").with_error(DiffmapError::Model("HTTP 503".into())));

        let (query, competitors, matrix) = inputs();
        let agent = DifferentiationStrategistAgent::new(model);
        let err = agent.generate(&query, &competitors, &matrix).await.unwrap_err();

        assert!(matches!(err, DiffmapError::Model(_)));
    }
}
