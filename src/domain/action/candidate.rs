//! Action candidates emitted by the rules engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, ContactId, DealId, Timestamp};
use crate::domain::health::HealthParam;
use crate::domain::next_step;

use super::{ActionPriority, ActionSource, ActionType, NextStep, SourceRule};

/// Keyword lists on candidates are capped at this size.
pub const MAX_KEYWORDS: usize = 5;

/// A proposed next action, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCandidate {
    /// Dedup key after lowercase/trim normalization.
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
    pub priority: ActionPriority,
    pub due_date: Timestamp,
    pub deal_id: DealId,
    pub account_id: AccountId,
    pub contact_id: Option<ContactId>,
    /// Free text describing how to execute; the targeted completion
    /// check compares sent content against this.
    pub suggested_action: Option<String>,
    /// Traceability back to the triggering health parameter.
    pub health_param: Option<HealthParam>,
    /// Keywords for the rules-based completion detector, at most
    /// [`MAX_KEYWORDS`] entries.
    pub keywords: Vec<String>,
    pub requires_external_evidence: bool,
    pub source: ActionSource,
    pub source_rule: SourceRule,
    pub next_step: NextStep,
}

impl ActionCandidate {
    /// Builds a candidate and resolves its channel through the
    /// next-step resolver. Rules never assign a channel directly;
    /// channel-by-runtime-value rules use [`with_channel_override`].
    ///
    /// [`with_channel_override`]: ActionCandidate::with_channel_override
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        action_type: ActionType,
        priority: ActionPriority,
        due_date: Timestamp,
        deal_id: DealId,
        account_id: AccountId,
        source_rule: SourceRule,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            action_type,
            priority,
            due_date,
            deal_id,
            account_id,
            contact_id: None,
            suggested_action: None,
            health_param: None,
            keywords: Vec::new(),
            requires_external_evidence: false,
            source: ActionSource::AutoGenerated,
            source_rule,
            next_step: next_step::resolve(source_rule, action_type, None),
        }
    }

    pub fn with_contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn with_suggested_action(mut self, text: impl Into<String>) -> Self {
        self.suggested_action = Some(text.into());
        self
    }

    pub fn with_health_param(mut self, param: HealthParam) -> Self {
        self.health_param = Some(param);
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self.keywords.truncate(MAX_KEYWORDS);
        self
    }

    pub fn with_external_evidence(mut self) -> Self {
        self.requires_external_evidence = true;
        self
    }

    pub fn from_playbook(mut self) -> Self {
        self.source = ActionSource::Playbook;
        self
    }

    /// Tier-one channel resolution: the emitting rule supplies the
    /// channel from a runtime value.
    pub fn with_channel_override(mut self, step: NextStep) -> Self {
        self.next_step = next_step::resolve(self.source_rule, self.action_type, Some(step));
        self
    }

    /// Title normalized for deduplication.
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }
}
