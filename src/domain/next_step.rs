//! Communication-channel ("next step") resolution.
//!
//! The single place a channel is assigned to an action. Three tiers:
//! a per-candidate dynamic override from the emitting rule, then a
//! static channel per rule identifier, then a fallback on action type.
//! The result is always defined; downstream UI routing and detection
//! strategy selection rely on that.

use super::action::{ActionType, NextStep, SourceRule};

/// Resolves the channel for one candidate.
///
/// `dynamic_override` is set by rules whose channel depends on a runtime
/// value rather than the rule identity (currently only the
/// unanswered-email rule, which switches email to call past the 7-day
/// boundary).
pub fn resolve(
    source_rule: SourceRule,
    action_type: ActionType,
    dynamic_override: Option<NextStep>,
) -> NextStep {
    if let Some(step) = dynamic_override {
        return step;
    }
    rule_channel(source_rule).unwrap_or_else(|| type_fallback(action_type))
}

/// Static channel per rule identifier.
///
/// Exhaustive over `SourceRule` so an unmapped rule is a compile error.
/// Playbook actions carry no rule-level channel; they fall through to
/// the action-type tier.
fn rule_channel(rule: SourceRule) -> Option<NextStep> {
    let step = match rule {
        // Close-date slippage is a conversation, not an email thread.
        SourceRule::HealthCloseDateUnconfirmed => NextStep::Call,
        SourceRule::HealthCloseDatePushed => NextStep::Call,
        SourceRule::HealthNoChampion => NextStep::Call,
        SourceRule::HealthNoDecisionMaker => NextStep::Linkedin,
        SourceRule::HealthSingleThreaded => NextStep::Linkedin,
        SourceRule::HealthNoNextMeeting => NextStep::Email,
        SourceRule::HealthProposalMissing => NextStep::Document,
        SourceRule::HealthLegalNotEngaged => NextStep::Email,
        SourceRule::HealthBudgetUnconfirmed => NextStep::Call,
        SourceRule::HealthDealSizeOutlier => NextStep::InternalTask,
        SourceRule::HealthCompetitorPresent => NextStep::Document,
        SourceRule::HealthDiscountPressure => NextStep::Slack,
        SourceRule::HealthMeetingCadenceBroken => NextStep::Email,
        SourceRule::HealthSlowResponses => NextStep::Whatsapp,
        SourceRule::StagnantDeal => NextStep::Call,
        SourceRule::ClosingImminent => NextStep::Call,
        SourceRule::PastCloseDate => NextStep::Call,
        SourceRule::HighValueNoRecentMeeting => NextStep::Email,
        SourceRule::StageQualifiedNoDiscovery => NextStep::Email,
        SourceRule::StageDemoNotHeld => NextStep::Email,
        SourceRule::StageDemoNotAdvanced => NextStep::Email,
        SourceRule::StageProposalStale => NextStep::Email,
        SourceRule::StageNegotiationBlockers => NextStep::Call,
        SourceRule::NoContacts => NextStep::Linkedin,
        SourceRule::DecisionMakerDisengaged => NextStep::Email,
        SourceRule::ChampionDisengaged => NextStep::Whatsapp,
        SourceRule::MeetingPrep => NextStep::InternalTask,
        SourceRule::MeetingFollowUp => NextStep::Email,
        SourceRule::UnansweredEmail => NextStep::Email,
        SourceRule::NoFiles => NextStep::InternalTask,
        SourceRule::FileImportFailed => NextStep::InternalTask,
        SourceRule::ProposalDocumentMissing => NextStep::Document,
        SourceRule::PlaybookAction => return None,
    };
    Some(step)
}

/// Fallback channel when the rule carries none.
fn type_fallback(action_type: ActionType) -> NextStep {
    match action_type {
        ActionType::EmailSend | ActionType::MeetingSchedule | ActionType::FollowUp => {
            NextStep::Email
        }
        ActionType::DocumentPrep => NextStep::Document,
        ActionType::TaskComplete | ActionType::Manual => NextStep::InternalTask,
    }
}
