use diffmap_core::{DiffmapError, MAX_SEARCH_RESULTS, Result};
use diffmap_model::DEFAULT_MODEL;
use std::env;

/// Runtime configuration resolved from the environment. Missing keys are a
/// fatal configuration error; nothing here is probed lazily.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
    pub model_name: String,
    pub max_search_results: usize,
}

impl AppConfig {
    /// Reads `GEMINI_API_KEY` (falling back to `GOOGLE_API_KEY`),
    /// `TAVILY_API_KEY`, and the optional `DIFFMAP_MODEL` override.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let tavily_api_key = env::var("TAVILY_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let model_name = env::var("DIFFMAP_MODEL").ok();

        Self::from_parts(gemini_api_key, tavily_api_key, model_name)
    }

    fn from_parts(
        gemini_api_key: Option<String>,
        tavily_api_key: Option<String>,
        model_name: Option<String>,
    ) -> Result<Self> {
        let gemini_api_key = gemini_api_key.ok_or_else(|| {
            DiffmapError::Config(
                "GEMINI_API_KEY (or GOOGLE_API_KEY) is not set".to_string(),
            )
        })?;
        let tavily_api_key = tavily_api_key
            .ok_or_else(|| DiffmapError::Config("TAVILY_API_KEY is not set".to_string()))?;

        Ok(Self {
            gemini_api_key,
            tavily_api_key,
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_search_results: MAX_SEARCH_RESULTS,
        })
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_key_is_config_error() {
        let err =
            AppConfig::from_parts(None, Some("tvly-key".into()), None).unwrap_err();
        assert!(matches!(err, DiffmapError::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_missing_search_key_is_config_error() {
        let err = AppConfig::from_parts(Some("g-key".into()), None, None).unwrap_err();
        assert!(matches!(err, DiffmapError::Config(_)));
        assert!(err.to_string().contains("TAVILY_API_KEY"));
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_parts(Some("g-key".into()), Some("tvly-key".into()), None).unwrap();
        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert_eq!(config.max_search_results, MAX_SEARCH_RESULTS);
    }

    #[test]
    fn test_model_override() {
        let config = AppConfig::from_parts(
            Some("g-key".into()),
            Some("tvly-key".into()),
            Some("gemini-1.5-pro".into()),
        )
        .unwrap();
        assert_eq!(config.model_name, "gemini-1.5-pro");
    }
}
