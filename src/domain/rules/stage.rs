//! Stage and timing rules.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
use crate::domain::context::DealContext;

/// Days without a sent email after which a proposal counts as stale.
const PROPOSAL_STALE_DAYS: i64 = 5;

/// Days since the last meeting after which a high-value deal needs one.
const HIGH_VALUE_MEETING_GAP_DAYS: i64 = 7;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    let mut out = Vec::new();
    let d = &ctx.derived;

    if d.is_stagnant {
        out.push(
            base(
                ctx,
                "Re-engage stagnant deal",
                format!("No stage movement in {} days.", d.days_in_stage),
                ActionType::FollowUp,
                ActionPriority::High,
                1,
                SourceRule::StagnantDeal,
            )
            .with_external_evidence(),
        );
    }

    if d.closing_imminently {
        out.push(base(
            ctx,
            "Prepare closing checklist",
            "The close date is within the next week.",
            ActionType::TaskComplete,
            ActionPriority::High,
            1,
            SourceRule::ClosingImminent,
        ));
    }

    if d.is_past_close {
        out.push(base(
            ctx,
            "Update the close date",
            "The recorded close date has passed without the deal closing.",
            ActionType::TaskComplete,
            ActionPriority::High,
            1,
            SourceRule::PastCloseDate,
        ));
    }

    if d.is_high_value && d.days_since_last_meeting.map_or(true, |days| days > HIGH_VALUE_MEETING_GAP_DAYS)
    {
        out.push(
            base(
                ctx,
                "Schedule an executive touchpoint",
                "High-value deal with no meeting in over a week.",
                ActionType::MeetingSchedule,
                ActionPriority::High,
                2,
                SourceRule::HighValueNoRecentMeeting,
            )
            .with_keywords(vec!["schedule".to_string(), "meeting".to_string()])
            .with_external_evidence(),
        );
    }

    let stage = &ctx.deal.stage;

    if stage.is("qualified") && d.completed_meetings.is_empty() {
        out.push(
            base(
                ctx,
                "Book a discovery call",
                "The deal is qualified but no discovery meeting has been held.",
                ActionType::MeetingSchedule,
                ActionPriority::High,
                2,
                SourceRule::StageQualifiedNoDiscovery,
            )
            .with_keywords(vec!["discovery".to_string(), "schedule".to_string()])
            .with_external_evidence(),
        );
    }

    if stage.is("demo") {
        let demo_meeting = ctx
            .meetings
            .iter()
            .find(|m| m.title.to_lowercase().contains("demo"));
        match demo_meeting {
            None => out.push(
                base(
                    ctx,
                    "Schedule the product demo",
                    "The deal is in demo stage but no demo is on the calendar.",
                    ActionType::MeetingSchedule,
                    ActionPriority::High,
                    2,
                    SourceRule::StageDemoNotHeld,
                )
                .with_keywords(vec!["demo".to_string(), "schedule".to_string()])
                .with_external_evidence(),
            ),
            Some(m) if m.is_completed(&ctx.now) && ctx.now.days_since(&m.starts_at) > 2 => {
                out.push(base(
                    ctx,
                    "Advance the deal out of demo",
                    "The demo was held but the deal has not moved to proposal.",
                    ActionType::TaskComplete,
                    ActionPriority::Medium,
                    2,
                    SourceRule::StageDemoNotAdvanced,
                ));
            }
            Some(_) => {}
        }
    }

    if stage.is("proposal") && d.days_in_stage > PROPOSAL_STALE_DAYS {
        let recent_sent = d
            .sent_emails
            .iter()
            .any(|e| ctx.now.days_since(&e.sent_at) <= PROPOSAL_STALE_DAYS);
        if !recent_sent {
            out.push(
                base(
                    ctx,
                    "Follow up on the proposal",
                    "The proposal has been out for days with no outreach since.",
                    ActionType::FollowUp,
                    ActionPriority::High,
                    1,
                    SourceRule::StageProposalStale,
                )
                .with_keywords(vec!["proposal".to_string(), "follow".to_string()])
                .with_external_evidence(),
            );
        }
    }

    if stage.is("negotiation") {
        out.push(base(
            ctx,
            "Identify negotiation blockers",
            "List open blockers and owners before the next negotiation session.",
            ActionType::TaskComplete,
            ActionPriority::High,
            1,
            SourceRule::StageNegotiationBlockers,
        ));
    }

    out
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
