//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless completion client - each call is independent
///
/// This is the capability object handed to the orchestrator at construction
/// time: no hidden process-wide singletons. Each completion request carries
/// its full context; no conversation state is kept between calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::debug;

    use super::*;
    use crate::llm::{StopReason, TokenUsage};

    /// Mock LLM client for unit tests
    ///
    /// Returns canned responses in order and records every request so tests
    /// can assert on prompt contents.
    pub struct MockLlmClient {
        responses: Vec<CompletionResponse>,
        call_count: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<CompletionResponse>) -> Self {
            debug!(response_count = responses.len(), "MockLlmClient::new: called");
            Self {
                responses,
                call_count: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Build a mock that returns the given payloads as message content
        pub fn with_payloads(payloads: Vec<&str>) -> Self {
            let responses = payloads
                .into_iter()
                .map(|p| CompletionResponse {
                    content: Some(p.to_string()),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                })
                .collect();
            Self::new(responses)
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Requests seen so far, in call order
        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().expect("mock requests lock").clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            debug!("MockLlmClient::complete: called");
            self.requests.lock().expect("mock requests lock").push(request);
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(idx)
                .cloned()
                .ok_or_else(|| LlmError::InvalidResponse("No more mock responses".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn request() -> CompletionRequest {
            CompletionRequest {
                system_prompt: "Test".to_string(),
                user_prompt: "Hello".to_string(),
                max_tokens: 100,
                temperature: 0.0,
                response_format: None,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockLlmClient::with_payloads(vec!["one", "two"]);

            let first = client.complete(request()).await.unwrap();
            assert_eq!(first.content.as_deref(), Some("one"));

            let second = client.complete(request()).await.unwrap();
            assert_eq!(second.content.as_deref(), Some("two"));

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            let result = client.complete(request()).await;
            assert!(result.is_err());
        }
    }
}
