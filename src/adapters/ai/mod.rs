//! AI adapters.
//!
//! `OpenAiProvider` implements the raw provider port against the chat
//! completions API; `LlmCompletionJudge` and `LlmEmailAnalyzer` layer
//! their prompts and strict JSON contracts on top of any provider. The
//! mock provider keeps tests offline.

mod analyzer;
mod judge;
mod mock_provider;
mod openai_provider;

pub use analyzer::{EmailAnalysis, EmailCategory, LlmEmailAnalyzer, Sentiment};
pub use judge::LlmCompletionJudge;
pub use mock_provider::MockProvider;
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
