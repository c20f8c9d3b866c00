use diffmap_core::{
    DiffmapError, FinishReason, Llm, LlmRequest, LlmResponse, Result, RetryConfig, UsageMetadata,
    execute_with_retry, is_transient_error,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini `generateContent` client. Blocking per pipeline step: one request,
/// bounded timeout, single retry on transient failure.
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: String,
    model_name: String,
    retry: RetryConfig,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DiffmapError::Model(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model_name: model.into(),
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self) -> String {
        format!("{BASE_URL}/models/{}:generateContent", self.model_name)
    }

    fn build_request(req: &LlmRequest) -> GenerateContentRequest {
        let contents = req
            .contents
            .iter()
            .map(|c| WireContent {
                role: c.role.clone(),
                parts: vec![WirePart { text: Some(c.text.clone()) }],
            })
            .collect();

        let generation_config = req.config.as_ref().map(|config| WireGenerationConfig {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
            // A schema forces JSON mode so the reply parses without repair.
            response_mime_type: config
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: config.response_schema.clone(),
        });

        GenerateContentRequest { contents, generation_config }
    }

    fn convert_response(resp: GenerateContentResponse) -> LlmResponse {
        let candidate = resp.candidates.into_iter().next();

        let text = candidate.as_ref().and_then(|c| c.content.as_ref()).map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        });

        let finish_reason =
            candidate.and_then(|c| c.finish_reason).map(|reason| match reason.as_str() {
                "STOP" => FinishReason::Stop,
                "MAX_TOKENS" => FinishReason::MaxTokens,
                "SAFETY" => FinishReason::Safety,
                _ => FinishReason::Other,
            });

        let usage = resp.usage_metadata.map(|u| UsageMetadata {
            prompt_token_count: u.prompt_token_count.unwrap_or(0),
            candidates_token_count: u.candidates_token_count.unwrap_or(0),
            total_token_count: u.total_token_count.unwrap_or(0),
        });

        LlmResponse { text: text.filter(|t| !t.is_empty()), usage, finish_reason }
    }

    async fn generate_once(&self, req: &LlmRequest) -> Result<LlmResponse> {
        let body = Self::build_request(req);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| DiffmapError::Model(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DiffmapError::Model(format!("HTTP {status}: {detail}")));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| DiffmapError::Model(e.to_string()))?;

        Ok(Self::convert_response(parsed))
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, req: LlmRequest) -> Result<LlmResponse> {
        tracing::debug!(model = %self.model_name, contents = req.contents.len(), "Calling Gemini");
        execute_with_retry(&self.retry, is_transient_error, || self.generate_once(&req)).await
    }
}

// Wire types for the generateContent REST surface.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<WireContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
    total_token_count: Option<i32>,
}
