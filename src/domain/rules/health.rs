//! Health-parameter rules: one rule per breakdown key.
//!
//! Each rule checks a specific state of its parameter; 2b and 6a carry
//! a secondary guard on a derived signal. Priorities and due offsets
//! are hardcoded per rule.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
use crate::domain::context::DealContext;
use crate::domain::health::{HealthParam, HealthState, ParamStatus};

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    let Some(breakdown) = &ctx.breakdown else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for param in HealthParam::ALL {
        let Some(status) = breakdown.get(param) else {
            continue;
        };
        if let Some(candidate) = evaluate_param(ctx, param, status) {
            out.push(candidate.with_health_param(param));
        }
    }
    out
}

fn evaluate_param(
    ctx: &DealContext,
    param: HealthParam,
    status: &ParamStatus,
) -> Option<ActionCandidate> {
    let state = status.state;
    match param {
        HealthParam::CloseDateConfirmed if state == HealthState::Unknown => Some(
            base(
                ctx,
                "Confirm close date with the buyer",
                "The recorded close date has not been confirmed by the buyer.",
                ActionType::FollowUp,
                ActionPriority::High,
                2,
                SourceRule::HealthCloseDateUnconfirmed,
            )
            .with_suggested_action("Ask the buyer to confirm the expected signature date")
            .with_keywords(kw(&["close date", "timeline", "confirm"]))
            .with_external_evidence(),
        ),
        HealthParam::CloseDatePushes if state == HealthState::Confirmed => {
            let pushes = status.push_count.unwrap_or(1);
            Some(base(
                ctx,
                "Re-qualify the timeline",
                format!("The close date has been pushed {} time(s); revisit the plan to close.", pushes),
                ActionType::TaskComplete,
                ActionPriority::High,
                1,
                SourceRule::HealthCloseDatePushed,
            ))
        }
        HealthParam::ChampionIdentified if state == HealthState::Unknown => Some(base(
            ctx,
            "Identify and develop a champion",
            "No champion has been identified on this deal.",
            ActionType::Manual,
            ActionPriority::High,
            3,
            SourceRule::HealthNoChampion,
        )),
        // Secondary guard: the contact list is authoritative.
        HealthParam::DecisionMakerEngaged
            if state == HealthState::Unknown && ctx.derived.decision_makers.is_empty() =>
        {
            Some(base(
                ctx,
                "Map the decision maker",
                "No decision maker is linked to this deal.",
                ActionType::Manual,
                ActionPriority::High,
                2,
                SourceRule::HealthNoDecisionMaker,
            ))
        }
        HealthParam::MultiThreading if state == HealthState::Unknown => Some(
            base(
                ctx,
                "Broaden contact coverage on the account",
                "The deal is single-threaded; ask for introductions to other stakeholders.",
                ActionType::EmailSend,
                ActionPriority::Medium,
                4,
                SourceRule::HealthSingleThreaded,
            )
            .with_keywords(kw(&["intro", "stakeholder"]))
            .with_external_evidence(),
        ),
        HealthParam::NextMeetingScheduled if state == HealthState::Absent => Some(
            base(
                ctx,
                "Schedule the next meeting",
                "No upcoming meeting is on the calendar for this deal.",
                ActionType::MeetingSchedule,
                ActionPriority::High,
                1,
                SourceRule::HealthNoNextMeeting,
            )
            .with_keywords(kw(&["schedule", "meeting"]))
            .with_external_evidence(),
        ),
        HealthParam::ProposalDelivered if state == HealthState::Unknown => Some(
            base(
                ctx,
                "Prepare and send the proposal",
                "No proposal has been delivered to the buyer.",
                ActionType::DocumentPrep,
                ActionPriority::Medium,
                3,
                SourceRule::HealthProposalMissing,
            )
            .with_suggested_action("Send the proposal with pricing to the buying team")
            .with_keywords(kw(&["proposal", "pricing", "send"]))
            .with_external_evidence(),
        ),
        HealthParam::LegalEngaged if state == HealthState::Unknown => Some(
            base(
                ctx,
                "Kick off legal and procurement review",
                "Legal/procurement has not been engaged on this deal.",
                ActionType::EmailSend,
                ActionPriority::Medium,
                5,
                SourceRule::HealthLegalNotEngaged,
            )
            .with_keywords(kw(&["legal", "contract", "procurement"]))
            .with_external_evidence(),
        ),
        HealthParam::BudgetConfirmed if state == HealthState::Unknown => Some(
            base(
                ctx,
                "Confirm budget with the economic buyer",
                "Budget has not been confirmed for this deal.",
                ActionType::FollowUp,
                ActionPriority::High,
                2,
                SourceRule::HealthBudgetUnconfirmed,
            )
            .with_keywords(kw(&["budget"]))
            .with_external_evidence(),
        ),
        HealthParam::DealSizeRealism if state == HealthState::Confirmed => Some(base(
            ctx,
            "Validate deal size assumptions",
            "The deal size is an outlier against comparable deals; validate the sizing.",
            ActionType::TaskComplete,
            ActionPriority::Medium,
            4,
            SourceRule::HealthDealSizeOutlier,
        )),
        HealthParam::CompetitorsPresent if state == HealthState::Confirmed => {
            let competitors = if status.competitors.is_empty() {
                "unnamed competitors".to_string()
            } else {
                status.competitors.join(", ")
            };
            Some(
                base(
                    ctx,
                    "Prepare competitive counter-strategy",
                    format!("Active competition on this deal: {}.", competitors),
                    ActionType::DocumentPrep,
                    ActionPriority::High,
                    2,
                    SourceRule::HealthCompetitorPresent,
                )
                .with_keywords(kw(&["competitive", "battlecard"])),
            )
        }
        HealthParam::DiscountPressure if state == HealthState::Confirmed => Some(base(
            ctx,
            "Escalate discount approval",
            "Discount pressure detected; route the request through deal desk.",
            ActionType::TaskComplete,
            ActionPriority::Medium,
            3,
            SourceRule::HealthDiscountPressure,
        )),
        // Secondary guard: only fire when the meeting signal agrees.
        HealthParam::MeetingCadence
            if state == HealthState::Unknown
                && ctx.derived.days_since_last_meeting.map_or(true, |d| d > 14) =>
        {
            Some(
                base(
                    ctx,
                    "Rebuild meeting cadence",
                    "Meeting cadence has broken down on this deal.",
                    ActionType::MeetingSchedule,
                    ActionPriority::Medium,
                    2,
                    SourceRule::HealthMeetingCadenceBroken,
                )
                .with_external_evidence(),
            )
        }
        HealthParam::EmailResponsiveness if state == HealthState::Confirmed => {
            let detail = status
                .avg_response_hours
                .map(|h| format!("Average reply time is {:.0} hours.", h))
                .unwrap_or_else(|| "Replies have slowed down noticeably.".to_string());
            Some(
                base(
                    ctx,
                    "Re-engage unresponsive contacts",
                    detail,
                    ActionType::FollowUp,
                    ActionPriority::Medium,
                    2,
                    SourceRule::HealthSlowResponses,
                )
                .with_external_evidence(),
            )
        }
        _ => None,
    }
}

fn base(
    ctx: &DealContext,
    title: &str,
    description: impl Into<String>,
    action_type: ActionType,
    priority: ActionPriority,
    due_days: i64,
    rule: SourceRule,
) -> ActionCandidate {
    ActionCandidate::new(
        title,
        description,
        action_type,
        priority,
        ctx.now.add_days(due_days),
        ctx.deal.id,
        ctx.deal.account_id,
        rule,
    )
}

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::fixtures::ContextBuilder;
    use serde_json::{json, Value};

    fn trigger_value(param: HealthParam) -> Value {
        let state = match param {
            HealthParam::CloseDatePushes
            | HealthParam::DealSizeRealism
            | HealthParam::CompetitorsPresent
            | HealthParam::DiscountPressure
            | HealthParam::EmailResponsiveness => "confirmed",
            HealthParam::NextMeetingScheduled => "absent",
            _ => "unknown",
        };
        json!({ "state": state })
    }

    #[test]
    fn each_param_trigger_yields_exactly_one_traceable_action() {
        for param in HealthParam::ALL {
            let ctx = ContextBuilder::new("demo")
                .breakdown(json!({ param.key(): trigger_value(param) }))
                .build();
            let candidates = evaluate(&ctx);
            assert_eq!(candidates.len(), 1, "param {} should fire once", param.key());
            assert_eq!(candidates[0].health_param, Some(param));
        }
    }

    #[test]
    fn confirmed_close_date_does_not_fire() {
        let ctx = ContextBuilder::new("demo")
            .breakdown(json!({ "1a": { "state": "confirmed" } }))
            .build();
        assert!(evaluate(&ctx).is_empty());
    }

    #[test]
    fn decision_maker_rule_respects_contact_guard() {
        let mut builder = ContextBuilder::new("demo")
            .breakdown(json!({ "2b": { "state": "unknown" } }));
        builder
            .contacts
            .push(crate::domain::context::fixtures::contact(
                crate::domain::crm::ContactRole::DecisionMaker,
            ));
        let ctx = builder.build();
        // A decision maker exists, so the health rule stays quiet.
        assert!(evaluate(&ctx).is_empty());
    }

    #[test]
    fn cadence_rule_respects_recent_meeting_guard() {
        let mut builder = ContextBuilder::new("demo")
            .breakdown(json!({ "6a": { "state": "unknown" } }));
        let deal_id = builder.deal.id;
        let now = builder.now;
        builder.meetings.push(crate::domain::context::fixtures::meeting(
            deal_id,
            crate::domain::crm::MeetingStatus::Completed,
            now.minus_days(3),
        ));
        let ctx = builder.build();
        assert!(evaluate(&ctx).is_empty());
    }

    #[test]
    fn competitor_rule_names_competitors() {
        let ctx = ContextBuilder::new("demo")
            .breakdown(json!({
                "5a": { "state": "confirmed", "competitors": ["Rival Inc", "Other Co"] }
            }))
            .build();
        let candidates = evaluate(&ctx);
        assert!(candidates[0].description.contains("Rival Inc, Other Co"));
    }

    #[test]
    fn push_count_appears_in_description() {
        let ctx = ContextBuilder::new("demo")
            .breakdown(json!({ "1b": { "state": "confirmed", "push_count": 3 } }))
            .build();
        let candidates = evaluate(&ctx);
        assert!(candidates[0].description.contains("3 time(s)"));
    }

    #[test]
    fn missing_breakdown_fires_nothing() {
        let ctx = ContextBuilder::new("demo").build();
        assert!(evaluate(&ctx).is_empty());
    }
}
