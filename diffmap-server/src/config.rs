use diffmap_pipeline::Pipeline;
use std::{sync::Arc, time::Duration};

/// Security configuration for the Diffmap server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all, which is NOT recommended for production)
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 64KB; requests carry only idea text)
    pub max_body_size: usize,
    /// Request timeout duration (default: 120 seconds; one request spans several upstream calls)
    pub request_timeout: Duration,
    /// Whether to include detailed error messages in responses (default: false for production)
    pub expose_error_details: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_body_size: 64 * 1024,
            request_timeout: Duration::from_secs(120),
            expose_error_details: false,
        }
    }
}

impl SecurityConfig {
    /// Permissive CORS and detailed errors, for local development.
    pub fn development() -> Self {
        Self { expose_error_details: true, ..Self::default() }
    }

    /// Locked-down configuration with an explicit origin allowlist.
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins, ..Self::default() }
    }
}

/// Configuration for the Diffmap server.
#[derive(Clone)]
pub struct ServerConfig {
    pub pipeline: Arc<Pipeline>,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline, security: SecurityConfig::default() }
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.security.allowed_origins = origins;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.security.request_timeout = timeout;
        self
    }

    /// Enable detailed error messages (for development only)
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.security.expose_error_details = expose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffmap_model::MockLlm;
    use diffmap_search::MockSearch;

    fn pipeline() -> Arc<Pipeline> {
        Arc::new(Pipeline::new(Arc::new(MockSearch::empty()), Arc::new(MockLlm::new("mock"))))
    }

    #[test]
    fn test_security_config_constructors() {
        let default = SecurityConfig::default();
        assert!(default.allowed_origins.is_empty());
        assert_eq!(default.request_timeout, Duration::from_secs(120));
        assert!(!default.expose_error_details);

        let dev = SecurityConfig::development();
        assert!(dev.expose_error_details);

        let prod = SecurityConfig::production(vec!["https://example.com".to_string()]);
        assert_eq!(prod.allowed_origins, vec!["https://example.com"]);
        assert!(!prod.expose_error_details);
    }

    #[test]
    fn test_server_config_builder() {
        let config = ServerConfig::new(pipeline())
            .with_allowed_origins(vec!["https://app.example".into()])
            .with_request_timeout(Duration::from_secs(10))
            .with_error_details(true);

        assert_eq!(config.security.allowed_origins, vec!["https://app.example"]);
        assert_eq!(config.security.request_timeout, Duration::from_secs(10));
        assert!(config.security.expose_error_details);
    }
}
