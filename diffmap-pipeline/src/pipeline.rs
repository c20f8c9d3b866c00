use crate::AppConfig;
use chrono::Utc;
use diffmap_agent::{
    CompetitorDiscoveryAgent, DifferentiationStrategistAgent, FeatureMatrixBuilderAgent,
    VisualGapMapperAgent,
};
use diffmap_core::{
    AnalysisBundle, Competitor, DifferentiationReport, FeatureGapChart, FeatureMatrix, Llm, Query,
    Result, SearchProvider,
};
use diffmap_model::GeminiModel;
use diffmap_search::TavilySearch;
use std::sync::Arc;
use uuid::Uuid;

/// The sequential analysis pipeline: discovery → matrix → strategy → chart.
///
/// Steps after input validation degrade rather than abort: a failed step
/// contributes its fallback value (empty list, empty matrix, placeholder
/// report) plus a notice string, and the run still produces a bundle.
pub struct Pipeline {
    discovery: CompetitorDiscoveryAgent,
    matrix_builder: FeatureMatrixBuilderAgent,
    strategist: DifferentiationStrategistAgent,
    gap_mapper: VisualGapMapperAgent,
}

impl Pipeline {
    pub fn new(search: Arc<dyn SearchProvider>, model: Arc<dyn Llm>) -> Self {
        Self {
            discovery: CompetitorDiscoveryAgent::new(search, model.clone()),
            matrix_builder: FeatureMatrixBuilderAgent::new(model.clone()),
            strategist: DifferentiationStrategistAgent::new(model),
            gap_mapper: VisualGapMapperAgent::new(),
        }
    }

    /// Bounds the number of search hits fed into discovery.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.discovery = self.discovery.with_max_results(max_results);
        self
    }

    /// Wires the real Tavily and Gemini clients from resolved configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let search = TavilySearch::new(config.tavily_api_key.clone())?;
        let model = GeminiModel::new(config.gemini_api_key.clone(), config.model_name.clone())?;
        Ok(Self::new(Arc::new(search), Arc::new(model))
            .with_max_results(config.max_search_results))
    }

    /// Runs the full analysis for one idea. Only invalid input and
    /// configuration errors abort the run.
    pub async fn run(&self, idea: &str) -> Result<AnalysisBundle> {
        let query = Query::new(idea)?;
        let mut notices = Vec::new();

        tracing::info!(query = %query, "Starting analysis");

        let competitors = match self.discovery.discover(&query).await {
            Ok(competitors) => competitors,
            Err(e) if !e.is_fatal() => {
                tracing::warn!(error = %e, "Competitor discovery failed");
                notices.push(format!("Competitor discovery failed: {e}"));
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        if competitors.is_empty() && notices.is_empty() {
            notices.push("No competitors were found for this idea.".to_string());
        }

        let matrix = match self.matrix_builder.build(&competitors).await {
            Ok(matrix) => matrix,
            Err(e) if !e.is_fatal() => {
                tracing::warn!(error = %e, "Feature matrix construction failed");
                notices.push(format!("Feature matrix construction failed: {e}"));
                FeatureMatrix::new()
            }
            Err(e) => return Err(e),
        };

        let report = self.generate_report(&query, &competitors, &matrix, &mut notices).await?;

        let chart = match self.gap_mapper.map(&competitors, &matrix) {
            Ok(chart) => chart,
            Err(e) if !e.is_fatal() => {
                tracing::warn!(error = %e, "Chart rendering failed");
                notices.push(format!("Chart rendering failed: {e}"));
                FeatureGapChart::empty()
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            competitors = competitors.len(),
            features = chart.features.len(),
            notices = notices.len(),
            "Analysis complete"
        );

        Ok(AnalysisBundle {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            query,
            competitors,
            feature_matrix: matrix,
            report,
            chart,
            notices,
        })
    }

    async fn generate_report(
        &self,
        query: &Query,
        competitors: &[Competitor],
        matrix: &FeatureMatrix,
        notices: &mut Vec<String>,
    ) -> Result<DifferentiationReport> {
        if competitors.is_empty() {
            return Ok(DifferentiationReport::placeholder());
        }
        match self.strategist.generate(query, competitors, matrix).await {
            Ok(report) => Ok(report),
            Err(e) if !e.is_fatal() => {
                tracing::warn!(error = %e, "Differentiation analysis failed");
                notices.push(format!("Differentiation analysis failed: {e}"));
                Ok(DifferentiationReport::placeholder())
            }
            Err(e) => Err(e),
        }
    }
}
