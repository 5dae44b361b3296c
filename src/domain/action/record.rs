//! Persisted action records and their completion state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AccountId, ActionId, ContactId, DealId, EmailId, MeetingId, OwnerScope, ScopedRecord,
    Timestamp,
};
use crate::domain::health::HealthParam;

use super::{ActionCandidate, ActionPriority, ActionSource, ActionType, NextStep, SourceRule};

/// Reference to the evidence that completed (or nearly completed) an
/// action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceRef {
    Email { email_id: EmailId },
    Meeting { meeting_id: MeetingId },
}

/// How a completion decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    /// Rules-based heuristic score.
    Rules,
    /// LLM semantic check from the targeted per-action path.
    AiContentCheck,
    /// LLM arbitration inside the hybrid band.
    AiArbitration,
    /// Detection disabled; sending from the action counted as doing it.
    SendCompletion,
    /// A human accepted a pending suggestion.
    SuggestionAccepted,
}

/// Completion details attached to a completed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub confidence: u8,
    pub reasoning: String,
    pub source: CompletionSource,
    pub evidence: Option<EvidenceRef>,
    pub auto_completed: bool,
    pub completed_at: Timestamp,
}

/// A persisted action.
///
/// Created from a candidate by the application layer; only the
/// completion detector (or an explicit user accept) mutates it after
/// that, and at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
    pub priority: ActionPriority,
    pub due_date: Timestamp,
    pub deal_id: DealId,
    pub account_id: AccountId,
    pub contact_id: Option<ContactId>,
    pub suggested_action: Option<String>,
    pub health_param: Option<HealthParam>,
    pub keywords: Vec<String>,
    pub requires_external_evidence: bool,
    pub source: ActionSource,
    pub source_rule: SourceRule,
    pub next_step: NextStep,
    pub completed: bool,
    pub completion: Option<CompletionRecord>,
    pub created_at: Timestamp,
    pub scope: OwnerScope,
}

impl Action {
    /// Materializes a candidate into a persistable record.
    pub fn from_candidate(candidate: ActionCandidate, scope: OwnerScope, now: Timestamp) -> Self {
        Self {
            id: ActionId::new(),
            title: candidate.title,
            description: candidate.description,
            action_type: candidate.action_type,
            priority: candidate.priority,
            due_date: candidate.due_date,
            deal_id: candidate.deal_id,
            account_id: candidate.account_id,
            contact_id: candidate.contact_id,
            suggested_action: candidate.suggested_action,
            health_param: candidate.health_param,
            keywords: candidate.keywords,
            requires_external_evidence: candidate.requires_external_evidence,
            source: candidate.source,
            source_rule: candidate.source_rule,
            next_step: candidate.next_step,
            completed: false,
            completion: None,
            created_at: now,
            scope,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Title normalized the same way candidates are deduplicated, so
    /// generation can skip candidates that duplicate an open action.
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }

    /// Applies a completion record. The store-level conditional update
    /// is the real atomicity boundary; this is the in-memory half.
    pub fn complete(&mut self, record: CompletionRecord) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completion = Some(record);
    }
}

impl ScopedRecord for Action {
    fn owner_scope(&self) -> &OwnerScope {
        &self.scope
    }
}
