//! General single-email analysis.
//!
//! Richer sibling of the completion judge: one LLM call summarizing an
//! email for the inbox consumers. The batch caller paces its own calls;
//! this adapter only owns the prompt and the answer contract.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::action::ActionPriority;
use crate::ports::{AiError, AiProvider, AiRequest};

const SYSTEM_PROMPT: &str = "You are a sales assistant analyzing one CRM email. Answer with a \
single JSON object {\"summary\": \"<one sentence>\", \"category\": \
<\"pricing\"|\"scheduling\"|\"technical\"|\"legal\"|\"relationship\"|\"other\">, \
\"sentiment\": <\"positive\"|\"neutral\"|\"negative\">, \"priority\": \
<\"high\"|\"medium\"|\"low\">, \"requires_response\": <bool>, \
\"action_items\": [<strings>], \"suggested_actions\": [<strings>]} and nothing else.";

/// Topic bucket assigned to an analyzed email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCategory {
    Pricing,
    Scheduling,
    Technical,
    Legal,
    Relationship,
    #[serde(other)]
    Other,
}

/// Overall tone of an analyzed email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// What the model must return for one email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailAnalysis {
    pub summary: String,
    pub category: EmailCategory,
    pub sentiment: Sentiment,
    pub priority: ActionPriority,
    pub requires_response: bool,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
}

pub struct LlmEmailAnalyzer {
    provider: Arc<dyn AiProvider>,
}

impl LlmEmailAnalyzer {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    pub async fn analyze(&self, subject: &str, body: &str) -> Result<EmailAnalysis, AiError> {
        let user_prompt = format!("Subject: {}\n\n{}", subject, body);
        let response = self
            .provider
            .complete(AiRequest::new(SYSTEM_PROMPT, user_prompt))
            .await?;
        Self::parse(&response.content)
    }

    fn parse(content: &str) -> Result<EmailAnalysis, AiError> {
        // Same fence tolerance as the completion judge.
        let trimmed = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();
        serde_json::from_str(trimmed)
            .map_err(|e| AiError::InvalidResponse(format!("{}: {}", e, trimmed)))
    }
}
