//! LlmClient trait definition

use async_trait::async_trait;

use super::{GenerationRequest, LlmError};

/// Stateless text generation client - each call is independent
///
/// This is the core abstraction for the external generative collaborator.
/// Each request carries its full prompt; no conversation state is kept
/// between calls, so the deterministic pipeline stays reproducible.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request (blocking until complete)
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError>;
}

/// Client standing in when no provider credentials are configured.
///
/// Every call fails with the configuration error, so callers take the same
/// degraded paths they use for provider outages and operations that never
/// reach the LLM keep working.
pub struct UnavailableClient {
    api_key_env: String,
}

impl UnavailableClient {
    pub fn missing_key(api_key_env: impl Into<String>) -> Self {
        Self {
            api_key_env: api_key_env.into(),
        }
    }
}

#[async_trait]
impl LlmClient for UnavailableClient {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, LlmError> {
        Err(LlmError::MissingApiKey(self.api_key_env.clone()))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Scripted response for the mock client
    pub enum MockReply {
        Text(String),
        Fail(String),
    }

    /// Mock LLM client for unit tests
    pub struct MockLlmClient {
        replies: Vec<MockReply>,
        repeat_last: bool,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<MockReply>) -> Self {
            debug!(reply_count = %replies.len(), "MockLlmClient::new: called");
            Self {
                replies,
                repeat_last: false,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Client whose every call returns the same text
        pub fn always(text: impl Into<String>) -> Self {
            Self {
                replies: vec![MockReply::Text(text.into())],
                repeat_last: true,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Client whose every call fails
        pub fn failing() -> Self {
            Self::new(vec![])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, LlmError> {
            debug!("MockLlmClient::generate: called");
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            let reply = if self.repeat_last && idx >= self.replies.len() {
                self.replies.last()
            } else {
                self.replies.get(idx)
            };

            match reply {
                Some(MockReply::Text(text)) => Ok(text.clone()),
                Some(MockReply::Fail(message)) => Err(LlmError::ApiError {
                    status: 503,
                    message: message.clone(),
                }),
                None => Err(LlmError::InvalidResponse("No more mock replies".to_string())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockLlmClient::new(vec![
                MockReply::Text("Reply 1".to_string()),
                MockReply::Text("Reply 2".to_string()),
            ]);

            let req = GenerationRequest::new("Test prompt");
            assert_eq!(client.generate(req.clone()).await.unwrap(), "Reply 1");
            assert_eq!(client.generate(req).await.unwrap(), "Reply 2");
            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::failing();
            let result = client.generate(GenerationRequest::new("Test")).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_mock_client_scripted_failure() {
            let client = MockLlmClient::new(vec![MockReply::Fail("boom".to_string())]);
            let err = client.generate(GenerationRequest::new("Test")).await.unwrap_err();
            assert!(matches!(err, LlmError::ApiError { status: 503, .. }));
        }

        #[tokio::test]
        async fn test_unavailable_client_reports_missing_key() {
            let client = UnavailableClient::missing_key("GEMINI_API_KEY");
            let err = client.generate(GenerationRequest::new("Test")).await.unwrap_err();
            assert!(matches!(err, LlmError::MissingApiKey(var) if var == "GEMINI_API_KEY"));
        }
    }
}
