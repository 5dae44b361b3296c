//! LLM completion judge.
//!
//! Wraps any provider with the completion-check prompt and a strict
//! JSON answer contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::ports::{AiError, AiProvider, AiRequest, CompletionJudge, JudgeRequest, JudgeVerdict};

const SYSTEM_PROMPT: &str = "You are a sales assistant verifying whether a piece of CRM \
activity completed a planned action. Answer with a single JSON object \
{\"confidence\": <0-100>, \"reasoning\": \"<one sentence>\"} and nothing else. \
High confidence means the activity clearly did what the action asked for; \
talking about doing it later is not doing it.";

/// What the model must return.
#[derive(Debug, Deserialize)]
struct VerdictPayload {
    confidence: u16,
    reasoning: String,
}

pub struct LlmCompletionJudge {
    provider: Arc<dyn AiProvider>,
}

impl LlmCompletionJudge {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    fn user_prompt(request: &JudgeRequest) -> String {
        let mut prompt = format!(
            "Planned action: {}\nDetails: {}\n",
            request.action_title, request.action_description
        );
        if let Some(suggested) = &request.suggested_action {
            prompt.push_str(&format!("Suggested execution: {}\n", suggested));
        }
        prompt.push_str(&format!("\nActivity content:\n{}\n", request.evidence_text));
        prompt.push_str("\nDid this activity complete the planned action?");
        prompt
    }

    fn parse(content: &str) -> Result<JudgeVerdict, AiError> {
        // Models occasionally fence the JSON despite instructions.
        let trimmed = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();
        let payload: VerdictPayload = serde_json::from_str(trimmed)
            .map_err(|e| AiError::InvalidResponse(format!("{}: {}", e, trimmed)))?;
        Ok(JudgeVerdict {
            confidence: payload.confidence.min(100) as u8,
            reasoning: payload.reasoning,
        })
    }
}

#[async_trait]
impl CompletionJudge for LlmCompletionJudge {
    async fn judge(&self, request: JudgeRequest) -> Result<JudgeVerdict, AiError> {
        let ai_request = AiRequest::new(SYSTEM_PROMPT, Self::user_prompt(&request));
        let response = self.provider.complete(ai_request).await?;
        Self::parse(&response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;

    fn request() -> JudgeRequest {
        JudgeRequest {
            action_title: "Send the proposal".to_string(),
            action_description: "Send the proposal to the buyer".to_string(),
            suggested_action: Some("Send the full proposal with pricing".to_string()),
            evidence_text: "Here is the proposal, pricing attached.".to_string(),
        }
    }

    #[tokio::test]
    async fn parses_a_clean_json_verdict() {
        let provider = MockProvider::new()
            .with_response(r#"{"confidence": 88, "reasoning": "Proposal was sent."}"#);
        let judge = LlmCompletionJudge::new(Arc::new(provider));
        let verdict = judge.judge(request()).await.unwrap();
        assert_eq!(verdict.confidence, 88);
        assert_eq!(verdict.reasoning, "Proposal was sent.");
    }

    #[tokio::test]
    async fn tolerates_fenced_json() {
        let provider = MockProvider::new()
            .with_response("```json\n{\"confidence\": 42, \"reasoning\": \"Unclear.\"}\n```");
        let judge = LlmCompletionJudge::new(Arc::new(provider));
        let verdict = judge.judge(request()).await.unwrap();
        assert_eq!(verdict.confidence, 42);
    }

    #[tokio::test]
    async fn clamps_out_of_range_confidence() {
        let provider = MockProvider::new()
            .with_response(r#"{"confidence": 140, "reasoning": "Very sure."}"#);
        let judge = LlmCompletionJudge::new(Arc::new(provider));
        let verdict = judge.judge(request()).await.unwrap();
        assert_eq!(verdict.confidence, 100);
    }

    #[tokio::test]
    async fn prose_answer_is_an_invalid_response() {
        let provider = MockProvider::new().with_response("Yes, it was completed.");
        let judge = LlmCompletionJudge::new(Arc::new(provider));
        let err = judge.judge(request()).await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = MockProvider::new().with_error(AiError::RateLimited);
        let judge = LlmCompletionJudge::new(Arc::new(provider));
        let err = judge.judge(request()).await.unwrap_err();
        assert!(matches!(err, AiError::RateLimited));
    }

    #[tokio::test]
    async fn prompt_carries_the_suggested_execution() {
        let provider = Arc::new(
            MockProvider::new().with_response(r#"{"confidence": 50, "reasoning": "ok"}"#),
        );
        let judge = LlmCompletionJudge::new(provider.clone());
        judge.judge(request()).await.unwrap();
        let sent = provider.requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].user_prompt.contains("Send the full proposal with pricing"));
        assert!(sent[0].user_prompt.contains("pricing attached"));
    }
}
