use diffmap_core::{DiffmapError, Llm, LlmRequest, LlmResponse, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Scripted model for tests. Replies are consumed in order and calls are
/// counted so tests can assert that a step made no model call at all.
pub struct MockLlm {
    name: String,
    replies: Mutex<VecDeque<Result<LlmResponse>>>,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), replies: Mutex::new(VecDeque::new()), calls: AtomicUsize::new(0) }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_response(LlmResponse::from_text(text))
    }

    pub fn with_error(self, error: DiffmapError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _req: LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DiffmapError::Model("mock has no queued reply".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let mock = MockLlm::new("test-llm").with_text("first").with_text("second");
        assert_eq!(mock.name(), "test-llm");

        let first = mock.generate(LlmRequest::from_prompt("a")).await.unwrap();
        let second = mock.generate(LlmRequest::from_prompt("b")).await.unwrap();

        assert_eq!(first.text(), Some("first"));
        assert_eq!(second.text(), Some("second"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_queued_error() {
        let mock = MockLlm::new("test").with_error(DiffmapError::Model("503".into()));

        let err = mock.generate(LlmRequest::from_prompt("x")).await.unwrap_err();
        assert!(matches!(err, DiffmapError::Model(_)));
    }

    #[tokio::test]
    async fn test_mock_errors_when_exhausted() {
        let mock = MockLlm::new("test");
        let err = mock.generate(LlmRequest::from_prompt("x")).await.unwrap_err();
        assert!(matches!(err, DiffmapError::Model(_)));
        assert_eq!(mock.call_count(), 1);
    }
}
