//! Mock AI provider for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{AiError, AiProvider, AiRequest, AiResponse};

/// Provider that replays scripted responses in order.
///
/// An exhausted script fails the call, so a test that over-calls the
/// provider fails loudly instead of looping.
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<Result<String, AiError>>>,
    requests: Mutex<Vec<AiRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    pub fn with_error(self, error: AiError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Requests seen so far, for assertion.
    pub fn requests(&self) -> Vec<AiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn complete(&self, request: AiRequest) -> Result<AiResponse, AiError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(AiResponse { content, model: "mock".to_string() }),
            Some(Err(err)) => Err(err),
            None => Err(AiError::Request("mock script exhausted".to_string())),
        }
    }
}
