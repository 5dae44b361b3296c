//! Completion judge port.
//!
//! Sits one level above the raw provider: given an action and a piece
//! of evidence, answer "did this evidence do the thing?" with a
//! bounded confidence and a one-line reasoning.

use async_trait::async_trait;

use crate::domain::action::Action;
use crate::domain::detection::EvidenceContent;
use crate::ports::AiError;

/// What the judge is asked to assess.
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub action_title: String,
    pub action_description: String,
    pub suggested_action: Option<String>,
    pub evidence_text: String,
}

impl JudgeRequest {
    pub fn for_action(action: &Action, evidence: &EvidenceContent) -> Self {
        Self {
            action_title: action.title.clone(),
            action_description: action.description.clone(),
            suggested_action: action.suggested_action.clone(),
            evidence_text: evidence.text().to_string(),
        }
    }
}

/// The judge's structured answer.
#[derive(Debug, Clone)]
pub struct JudgeVerdict {
    /// 0..=100; implementations must clamp before returning.
    pub confidence: u8,
    pub reasoning: String,
}

/// Port for semantic completion checks.
#[async_trait]
pub trait CompletionJudge: Send + Sync {
    /// Assess whether the evidence completes the action.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; callers own the degradation
    /// policy (rules fallback in the hybrid band, fixed-confidence
    /// completion on the targeted path).
    async fn judge(&self, request: JudgeRequest) -> Result<JudgeVerdict, AiError>;
}
