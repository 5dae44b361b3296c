//! Meeting rules: prep for imminent meetings, follow-up after held ones.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
use crate::domain::context::DealContext;

/// How soon an upcoming meeting triggers a prep action, in days.
const PREP_WINDOW_DAYS: i64 = 1;

/// How long after a held meeting a follow-up is still expected, in days.
const FOLLOW_UP_WINDOW_DAYS: i64 = 2;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    let mut out = Vec::new();

    for meeting in &ctx.derived.upcoming_meetings {
        let days_away = ctx.now.days_until(&meeting.starts_at);
        if (0..=PREP_WINDOW_DAYS).contains(&days_away) {
            out.push(ActionCandidate::new(
                format!("Prepare for meeting: {}", meeting.title),
                format!("\"{}\" starts within a day; prepare the agenda and materials.", meeting.title),
                ActionType::TaskComplete,
                ActionPriority::High,
                meeting.starts_at,
                ctx.deal.id,
                ctx.deal.account_id,
                SourceRule::MeetingPrep,
            ));
        }
    }

    if let Some(last) = &ctx.derived.last_completed_meeting {
        let days_since = ctx.now.days_since(&last.starts_at);
        let followed_up = ctx
            .derived
            .sent_emails
            .iter()
            .any(|e| e.sent_at.is_after(&last.starts_at));
        if (0..=FOLLOW_UP_WINDOW_DAYS).contains(&days_since) && !followed_up {
            out.push(
                ActionCandidate::new(
                    format!("Send follow-up for {}", last.title),
                    format!("\"{}\" was held but no follow-up email has gone out.", last.title),
                    ActionType::EmailSend,
                    ActionPriority::High,
                    ctx.now.add_days(1),
                    ctx.deal.id,
                    ctx.deal.account_id,
                    SourceRule::MeetingFollowUp,
                )
                .with_suggested_action(format!("Send a recap of \"{}\" with agreed next steps", last.title))
                .with_keywords(vec!["follow".to_string(), "recap".to_string(), "next steps".to_string()])
                .with_external_evidence(),
            );
        }
    }

    out
}
