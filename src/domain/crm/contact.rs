//! Contact records with per-deal roles.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ContactId;

/// Role a contact plays on a specific deal.
///
/// Comes from the deal-contact association, not the contact record
/// itself; the same person can be a champion on one deal and a blocker
/// on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRole {
    DecisionMaker,
    EconomicBuyer,
    Champion,
    Influencer,
    Blocker,
    EndUser,
    Technical,
    Executive,
}

impl ContactRole {
    /// Roles counted as stakeholders for engagement coverage.
    pub fn is_stakeholder(&self) -> bool {
        matches!(
            self,
            ContactRole::DecisionMaker
                | ContactRole::EconomicBuyer
                | ContactRole::Champion
                | ContactRole::Influencer
                | ContactRole::Executive
        )
    }
}

/// A person linked to a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: Option<String>,
    pub role: ContactRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_maker_is_stakeholder() {
        assert!(ContactRole::DecisionMaker.is_stakeholder());
    }

    #[test]
    fn blocker_and_end_user_are_not_stakeholders() {
        assert!(!ContactRole::Blocker.is_stakeholder());
        assert!(!ContactRole::EndUser.is_stakeholder());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&ContactRole::EconomicBuyer).unwrap();
        assert_eq!(json, "\"economic_buyer\"");
    }
}
