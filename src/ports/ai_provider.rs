//! AI provider port - interface for LLM provider integrations.
//!
//! Abstracts the raw completion call so the completion judge can run
//! against OpenAI in production and a scripted mock in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single non-streaming completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    /// Kept low; verdicts should be deterministic-ish.
    pub temperature: f32,
}

impl AiRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_tokens: 512,
            temperature: 0.1,
        }
    }
}

/// The provider's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    pub content: String,
    pub model: String,
}

/// Failure modes of a provider call.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI provider request failed: {0}")]
    Request(String),

    #[error("AI provider rate limited")]
    RateLimited,

    #[error("AI provider returned an unparseable response: {0}")]
    InvalidResponse(String),

    #[error("AI provider timed out after {0}s")]
    Timeout(u64),
}

impl AiError {
    /// Whether a single retry is worth attempting.
    pub fn is_transient(&self) -> bool {
        matches!(self, AiError::Request(_) | AiError::RateLimited | AiError::Timeout(_))
    }
}

/// Port for LLM provider interactions.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: AiRequest) -> Result<AiResponse, AiError>;
}
