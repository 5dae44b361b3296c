//! Pending completion suggestions awaiting human confirmation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ActionId, DomainError, ErrorCode, OwnerScope, ScopedRecord, SuggestionId, Timestamp,
};

use super::EvidenceRef;

/// Resolution state of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Dismissed,
}

/// Links one action to one piece of ambiguous evidence.
///
/// Created when completion confidence clears the minimum threshold but
/// not the auto-complete threshold. Accepting cascades completion of
/// the parent action; both outcomes are terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSuggestion {
    pub id: SuggestionId,
    pub action_id: ActionId,
    pub evidence: EvidenceRef,
    pub confidence: u8,
    pub reasoning: String,
    pub status: SuggestionStatus,
    pub created_at: Timestamp,
    pub scope: OwnerScope,
}

impl ActionSuggestion {
    pub fn pending(
        action_id: ActionId,
        evidence: EvidenceRef,
        confidence: u8,
        reasoning: impl Into<String>,
        scope: OwnerScope,
        now: Timestamp,
    ) -> Self {
        Self {
            id: SuggestionId::new(),
            action_id,
            evidence,
            confidence,
            reasoning: reasoning.into(),
            status: SuggestionStatus::Pending,
            created_at: now,
            scope,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SuggestionStatus::Pending
    }

    /// Marks the suggestion accepted. Pending-only transition.
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.transition(SuggestionStatus::Accepted)
    }

    /// Marks the suggestion dismissed. Pending-only transition.
    pub fn dismiss(&mut self) -> Result<(), DomainError> {
        self.transition(SuggestionStatus::Dismissed)
    }

    fn transition(&mut self, next: SuggestionStatus) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::new(
                ErrorCode::SuggestionAlreadyResolved,
                format!("Suggestion {} is no longer pending", self.id),
            ));
        }
        self.status = next;
        Ok(())
    }
}

impl ScopedRecord for ActionSuggestion {
    fn owner_scope(&self) -> &OwnerScope {
        &self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EmailId, OrgId, UserId};

    fn suggestion() -> ActionSuggestion {
        ActionSuggestion::pending(
            ActionId::new(),
            EvidenceRef::Email { email_id: EmailId::new() },
            65,
            "uncertain match",
            OwnerScope::new(UserId::new("u1").unwrap(), OrgId::new("o1").unwrap()),
            Timestamp::now(),
        )
    }

    #[test]
    fn new_suggestion_is_pending() {
        assert!(suggestion().is_pending());
    }

    #[test]
    fn accept_transitions_once() {
        let mut s = suggestion();
        assert!(s.accept().is_ok());
        assert_eq!(s.status, SuggestionStatus::Accepted);
        let err = s.accept().unwrap_err();
        assert_eq!(err.code, ErrorCode::SuggestionAlreadyResolved);
    }

    #[test]
    fn dismiss_after_accept_is_rejected() {
        let mut s = suggestion();
        s.accept().unwrap();
        assert!(s.dismiss().is_err());
    }
}
