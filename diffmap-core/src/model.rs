use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A hosted generative-model capability. Treated as a black box: it takes
/// prompt contents and returns text that may need to be parsed.
#[async_trait]
pub trait Llm: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, req: LlmRequest) -> Result<LlmResponse>;
}

/// One role-tagged prompt message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub text: String,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".to_string(), text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: "model".to_string(), text: text.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<i32>,
    pub max_output_tokens: Option<i32>,
    /// JSON schema for structured output. When set, providers that support
    /// it constrain the response to valid JSON of this shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub contents: Vec<Content>,
    pub config: Option<GenerateContentConfig>,
}

impl LlmRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents, config: None }
    }

    /// Single user-turn request, the common case for pipeline prompts.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Content::user(prompt)])
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.config.get_or_insert_with(GenerateContentConfig::default).response_schema =
            Some(schema);
        self
    }

    pub fn with_config(mut self, config: GenerateContentConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_token_count: i32,
    pub candidates_token_count: i32,
    pub total_token_count: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: Option<String>,
    pub usage: Option<UsageMetadata>,
    pub finish_reason: Option<FinishReason>,
}

impl LlmResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), usage: None, finish_reason: Some(FinishReason::Stop) }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_prompt() {
        let req = LlmRequest::from_prompt("list competitors");
        assert_eq!(req.contents.len(), 1);
        assert_eq!(req.contents[0].role, "user");
        assert!(req.config.is_none());
    }

    #[test]
    fn test_request_with_response_schema() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        });
        let req = LlmRequest::from_prompt("x").with_response_schema(schema.clone());

        let config = req.config.unwrap();
        assert_eq!(config.response_schema.unwrap(), schema);
    }

    #[test]
    fn test_request_with_config() {
        let config = GenerateContentConfig {
            temperature: Some(0.7),
            max_output_tokens: Some(2048),
            ..Default::default()
        };
        let req = LlmRequest::from_prompt("x").with_config(config);

        let config = req.config.unwrap();
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_output_tokens, Some(2048));
    }

    #[test]
    fn test_response_from_text() {
        let resp = LlmResponse::from_text("hello");
        assert_eq!(resp.text(), Some("hello"));
        assert_eq!(resp.finish_reason, Some(FinishReason::Stop));
    }
}
