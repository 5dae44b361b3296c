//! Playbook rules: one candidate per configured stage key-action.

use crate::domain::action::{ActionCandidate, SourceRule};
use crate::domain::context::DealContext;
use crate::domain::playbook;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    ctx.playbook_actions
        .iter()
        .map(|text| {
            let action_type = playbook::classify_action_type(text);
            let stage = &ctx.deal.stage;
            let due_days = playbook::suggest_due_days(stage, action_type);
            let priority = playbook::suggest_priority(stage, action_type);

            let mut candidate = ActionCandidate::new(
                text.clone(),
                format!("Playbook action for the {} stage.", stage.as_str()),
                action_type,
                priority,
                ctx.now.add_days(due_days),
                ctx.deal.id,
                ctx.deal.account_id,
                SourceRule::PlaybookAction,
            )
            .with_suggested_action(text.clone())
            .with_keywords(playbook::extract_keywords(text))
            .from_playbook();

            if playbook::requires_external_evidence(action_type, text) {
                candidate = candidate.with_external_evidence();
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::{ActionPriority, ActionSource, ActionType, NextStep};
    use crate::domain::context::fixtures::ContextBuilder;

    #[test]
    fn key_action_round_trips_through_the_helper() {
        let mut b = ContextBuilder::new("demo");
        b.playbook_actions
            .push("Schedule demo call with technical stakeholders".to_string());
        let ctx = b.build();

        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.action_type, ActionType::MeetingSchedule);
        assert_eq!(c.source, ActionSource::Playbook);
        assert_eq!(c.source_rule, SourceRule::PlaybookAction);
        assert!(c.keywords.iter().any(|k| k == "demo"));
        assert!(c.requires_external_evidence);
        // Channel comes from the action-type fallback tier.
        assert_eq!(c.next_step, NextStep::Email);
        // Demo is not an aggressive stage: normal tables apply.
        assert_eq!(c.priority, ActionPriority::Medium);
    }

    #[test]
    fn aggressive_stage_applies_urgent_tables() {
        let mut b = ContextBuilder::new("negotiation");
        b.playbook_actions
            .push("Schedule demo call with technical stakeholders".to_string());
        let ctx = b.build();
        let candidates = evaluate(&ctx);
        assert_eq!(candidates[0].priority, ActionPriority::High);
    }

    #[test]
    fn empty_playbook_emits_nothing() {
        let ctx = ContextBuilder::new("demo").build();
        assert!(evaluate(&ctx).is_empty());
    }
}
