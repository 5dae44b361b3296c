//! Identifiers for the rules that emit action candidates.

use serde::{Deserialize, Serialize};

/// Exactly which rule emitted an action candidate.
///
/// A closed enum rather than a free string so the next-step resolver's
/// mapping is exhaustiveness-checked at compile time: adding a rule
/// without assigning it a channel is a build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRule {
    // Health-parameter rules (one per breakdown key)
    HealthCloseDateUnconfirmed,
    HealthCloseDatePushed,
    HealthNoChampion,
    HealthNoDecisionMaker,
    HealthSingleThreaded,
    HealthNoNextMeeting,
    HealthProposalMissing,
    HealthLegalNotEngaged,
    HealthBudgetUnconfirmed,
    HealthDealSizeOutlier,
    HealthCompetitorPresent,
    HealthDiscountPressure,
    HealthMeetingCadenceBroken,
    HealthSlowResponses,

    // Stage/timing rules
    StagnantDeal,
    ClosingImminent,
    PastCloseDate,
    HighValueNoRecentMeeting,
    StageQualifiedNoDiscovery,
    StageDemoNotHeld,
    StageDemoNotAdvanced,
    StageProposalStale,
    StageNegotiationBlockers,

    // Contact-engagement rules
    NoContacts,
    DecisionMakerDisengaged,
    ChampionDisengaged,

    // Meeting rules
    MeetingPrep,
    MeetingFollowUp,

    // Email rules
    UnansweredEmail,

    // File rules
    NoFiles,
    FileImportFailed,
    ProposalDocumentMissing,

    // Playbook rules
    PlaybookAction,
}

impl SourceRule {
    /// Stable identifier persisted with the action record.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceRule::HealthCloseDateUnconfirmed => "health_close_date_unconfirmed",
            SourceRule::HealthCloseDatePushed => "health_close_date_pushed",
            SourceRule::HealthNoChampion => "health_no_champion",
            SourceRule::HealthNoDecisionMaker => "health_no_decision_maker",
            SourceRule::HealthSingleThreaded => "health_single_threaded",
            SourceRule::HealthNoNextMeeting => "health_no_next_meeting",
            SourceRule::HealthProposalMissing => "health_proposal_missing",
            SourceRule::HealthLegalNotEngaged => "health_legal_not_engaged",
            SourceRule::HealthBudgetUnconfirmed => "health_budget_unconfirmed",
            SourceRule::HealthDealSizeOutlier => "health_deal_size_outlier",
            SourceRule::HealthCompetitorPresent => "health_competitor_present",
            SourceRule::HealthDiscountPressure => "health_discount_pressure",
            SourceRule::HealthMeetingCadenceBroken => "health_meeting_cadence_broken",
            SourceRule::HealthSlowResponses => "health_slow_responses",
            SourceRule::StagnantDeal => "stagnant_deal",
            SourceRule::ClosingImminent => "closing_imminent",
            SourceRule::PastCloseDate => "past_close_date",
            SourceRule::HighValueNoRecentMeeting => "high_value_no_recent_meeting",
            SourceRule::StageQualifiedNoDiscovery => "stage_qualified_no_discovery",
            SourceRule::StageDemoNotHeld => "stage_demo_not_held",
            SourceRule::StageDemoNotAdvanced => "stage_demo_not_advanced",
            SourceRule::StageProposalStale => "stage_proposal_stale",
            SourceRule::StageNegotiationBlockers => "stage_negotiation_blockers",
            SourceRule::NoContacts => "no_contacts",
            SourceRule::DecisionMakerDisengaged => "decision_maker_disengaged",
            SourceRule::ChampionDisengaged => "champion_disengaged",
            SourceRule::MeetingPrep => "meeting_prep",
            SourceRule::MeetingFollowUp => "meeting_follow_up",
            SourceRule::UnansweredEmail => "unanswered_email",
            SourceRule::NoFiles => "no_files",
            SourceRule::FileImportFailed => "file_import_failed",
            SourceRule::ProposalDocumentMissing => "proposal_document_missing",
            SourceRule::PlaybookAction => "playbook_action",
        }
    }

    /// Every rule identifier, for totality tests.
    pub const ALL: [SourceRule; 33] = [
        SourceRule::HealthCloseDateUnconfirmed,
        SourceRule::HealthCloseDatePushed,
        SourceRule::HealthNoChampion,
        SourceRule::HealthNoDecisionMaker,
        SourceRule::HealthSingleThreaded,
        SourceRule::HealthNoNextMeeting,
        SourceRule::HealthProposalMissing,
        SourceRule::HealthLegalNotEngaged,
        SourceRule::HealthBudgetUnconfirmed,
        SourceRule::HealthDealSizeOutlier,
        SourceRule::HealthCompetitorPresent,
        SourceRule::HealthDiscountPressure,
        SourceRule::HealthMeetingCadenceBroken,
        SourceRule::HealthSlowResponses,
        SourceRule::StagnantDeal,
        SourceRule::ClosingImminent,
        SourceRule::PastCloseDate,
        SourceRule::HighValueNoRecentMeeting,
        SourceRule::StageQualifiedNoDiscovery,
        SourceRule::StageDemoNotHeld,
        SourceRule::StageDemoNotAdvanced,
        SourceRule::StageProposalStale,
        SourceRule::StageNegotiationBlockers,
        SourceRule::NoContacts,
        SourceRule::DecisionMakerDisengaged,
        SourceRule::ChampionDisengaged,
        SourceRule::MeetingPrep,
        SourceRule::MeetingFollowUp,
        SourceRule::UnansweredEmail,
        SourceRule::NoFiles,
        SourceRule::FileImportFailed,
        SourceRule::ProposalDocumentMissing,
        SourceRule::PlaybookAction,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_distinct() {
        let ids: HashSet<&str> = SourceRule::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(ids.len(), SourceRule::ALL.len());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SourceRule::NoContacts).unwrap();
        assert_eq!(json, "\"no_contacts\"");
    }
}
