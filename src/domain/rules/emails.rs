//! Email rules: chase unanswered outbound threads.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, NextStep, SourceRule};
use crate::domain::context::DealContext;

/// How many unanswered threads to chase per run.
const MAX_UNANSWERED_ACTIONS: usize = 2;

/// Past this many days unanswered, escalate priority and switch the
/// channel from an email retry to a phone call.
const ESCALATION_DAYS: i64 = 7;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    ctx.derived
        .unanswered_emails
        .iter()
        .take(MAX_UNANSWERED_ACTIONS)
        .map(|email| {
            let days = ctx.now.days_since(&email.sent_at);
            let escalated = days > ESCALATION_DAYS;

            let (priority, channel, suggestion) = if escalated {
                (
                    ActionPriority::High,
                    NextStep::Call,
                    format!("Call the contact; \"{}\" has gone unanswered for {} days", email.subject, days),
                )
            } else {
                (
                    ActionPriority::Medium,
                    NextStep::Email,
                    format!("Send a short reminder on the \"{}\" thread", email.subject),
                )
            };

            ActionCandidate::new(
                format!("Follow up on \"{}\"", email.subject),
                format!("Sent {} days ago with no reply.", days),
                ActionType::FollowUp,
                priority,
                ctx.now.add_days(1),
                ctx.deal.id,
                ctx.deal.account_id,
                SourceRule::UnansweredEmail,
            )
            .with_suggested_action(suggestion)
            .with_keywords(vec!["follow".to_string(), "reminder".to_string()])
            .with_external_evidence()
            // Channel depends on the age of the thread, not the rule
            // identity, so this rule sets the override itself.
            .with_channel_override(channel)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::fixtures::{email, ContextBuilder};
    use crate::domain::crm::EmailDirection;

    fn ctx_with_unanswered(ages_days: &[i64]) -> DealContext {
        let mut b = ContextBuilder::new("proposal");
        let deal_id = b.deal.id;
        let now = b.now;
        for age in ages_days {
            b.emails.push(email(deal_id, EmailDirection::Sent, now.minus_days(*age), None));
        }
        b.build()
    }

    #[test]
    fn at_most_two_oldest_threads_are_chased() {
        let ctx = ctx_with_unanswered(&[4, 6, 9, 12]);
        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 2);
        // Oldest first.
        assert!(candidates[0].description.contains("12 days"));
        assert!(candidates[1].description.contains("9 days"));
    }

    #[test]
    fn exactly_seven_days_stays_on_email_at_medium() {
        let ctx = ctx_with_unanswered(&[7]);
        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].priority, ActionPriority::Medium);
        assert_eq!(candidates[0].next_step, NextStep::Email);
    }

    #[test]
    fn past_seven_days_escalates_to_call_at_high() {
        let ctx = ctx_with_unanswered(&[8]);
        let candidates = evaluate(&ctx);
        assert_eq!(candidates[0].priority, ActionPriority::High);
        assert_eq!(candidates[0].next_step, NextStep::Call);
        assert!(candidates[0].suggested_action.as_ref().unwrap().contains("Call"));
    }

    #[test]
    fn no_unanswered_emails_fires_nothing() {
        let ctx = ctx_with_unanswered(&[]);
        assert!(evaluate(&ctx).is_empty());
    }
}
