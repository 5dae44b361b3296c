//! Deal and account records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{AccountId, DealId, OwnerScope, ScopedRecord, Timestamp};

/// Pipeline stage of a deal.
///
/// Stage names are org-configurable free text, so the type keeps the raw
/// string and exposes the predicates the rules engine needs instead of a
/// closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealStage(String);

/// Stage-name fragments that mark a late-stage, urgency-driven deal.
const AGGRESSIVE_FRAGMENTS: &[&str] = &["proposal", "negotiation", "closing", "verbal"];

/// Stage names in which a deal is expected to carry supporting files.
const ACTIVE_FRAGMENTS: &[&str] = &["demo", "proposal", "negotiation", "closing"];

impl DealStage {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Raw stage name as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }

    /// True for terminal stages; terminal deals are never stagnant.
    pub fn is_closed(&self) -> bool {
        matches!(self.normalized().as_str(), "closed_won" | "closed_lost")
    }

    /// Exact (case-insensitive) stage match for stage-literal rules.
    pub fn is(&self, name: &str) -> bool {
        self.normalized() == name
    }

    /// True when the stage name contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.normalized().contains(fragment)
    }

    /// Late-stage deals get the aggressive due-date/priority tables.
    pub fn is_aggressive(&self) -> bool {
        let name = self.normalized();
        AGGRESSIVE_FRAGMENTS.iter().any(|f| name.contains(f))
    }

    /// Stages in which the absence of any files is itself a signal.
    pub fn expects_files(&self) -> bool {
        let name = self.normalized();
        ACTIVE_FRAGMENTS.iter().any(|f| name.contains(f))
    }
}

/// A sales deal as read from the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub account_id: AccountId,
    pub name: String,
    pub stage: DealStage,
    /// Deal value in the deal's currency unit. Absent for unsized deals.
    pub value: Option<i64>,
    pub close_date: Option<Timestamp>,
    pub updated_at: Timestamp,
    pub health_score: Option<i32>,
    /// Stored health-score breakdown, either a JSON object or a
    /// serialized-JSON string; parsed by the context builder.
    pub health_breakdown_raw: Option<Value>,
    pub scope: OwnerScope,
}

impl ScopedRecord for Deal {
    fn owner_scope(&self) -> &OwnerScope {
        &self.scope
    }
}

/// The company a deal is sold to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_stages_are_closed() {
        assert!(DealStage::new("closed_won").is_closed());
        assert!(DealStage::new("Closed_Lost").is_closed());
        assert!(!DealStage::new("negotiation").is_closed());
    }

    #[test]
    fn aggressive_matches_by_fragment() {
        assert!(DealStage::new("Contract Negotiation").is_aggressive());
        assert!(DealStage::new("verbal commit").is_aggressive());
        assert!(!DealStage::new("qualified").is_aggressive());
    }

    #[test]
    fn expects_files_in_active_stages() {
        assert!(DealStage::new("demo").expects_files());
        assert!(DealStage::new("proposal sent").expects_files());
        assert!(!DealStage::new("prospecting").expects_files());
    }

    #[test]
    fn stage_literal_match_is_case_insensitive() {
        assert!(DealStage::new(" Qualified ").is("qualified"));
        assert!(!DealStage::new("qualified out").is("qualified"));
    }
}
