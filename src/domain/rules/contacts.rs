//! Contact-engagement rules.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
use crate::domain::context::DealContext;
use crate::domain::crm::Contact;

/// Days of silence tolerated for a decision maker.
const DECISION_MAKER_GAP_DAYS: i64 = 14;

/// Days of silence tolerated for a champion.
const CHAMPION_GAP_DAYS: i64 = 7;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    // Escape hatch: with no contacts at all, per-contact checks are
    // meaningless. Emit one action and stop.
    if ctx.contacts.is_empty() {
        return vec![base(
            ctx,
            "Add contacts to this deal",
            "The deal has no linked contacts; engagement cannot be tracked.",
            ActionType::Manual,
            ActionPriority::High,
            1,
            SourceRule::NoContacts,
        )];
    }

    let mut out = Vec::new();

    for dm in &ctx.derived.decision_makers {
        if let Some(candidate) = engagement_check(
            ctx,
            dm,
            DECISION_MAKER_GAP_DAYS,
            SourceRule::DecisionMakerDisengaged,
            "decision maker",
        ) {
            out.push(candidate);
        }
    }

    for champion in &ctx.derived.champions {
        if let Some(candidate) = engagement_check(
            ctx,
            champion,
            CHAMPION_GAP_DAYS,
            SourceRule::ChampionDisengaged,
            "champion",
        ) {
            out.push(candidate);
        }
    }

    out
}

fn engagement_check(
    ctx: &DealContext,
    contact: &Contact,
    gap_days: i64,
    rule: SourceRule,
    role_label: &str,
) -> Option<ActionCandidate> {
    let silence = match ctx.days_since_sent_to(contact.id) {
        // Never contacted: no sentinel arithmetic, just an explicit
        // absent variant messaged as a long gap.
        None => "over 30 days".to_string(),
        Some(days) if days > gap_days => format!("{} days", days),
        Some(_) => return None,
    };

    let priority = if rule == SourceRule::DecisionMakerDisengaged {
        ActionPriority::High
    } else {
        ActionPriority::Medium
    };

    Some(
        base(
            ctx,
            &format!("Re-engage {} {}", role_label, contact.name),
            format!("No email to {} in {}.", contact.name, silence),
            ActionType::FollowUp,
            priority,
            2,
            rule,
        )
        .with_contact(contact.id)
        .with_keywords(vec!["follow".to_string()])
        .with_external_evidence(),
    )
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::fixtures::{contact, email, ContextBuilder};
    use crate::domain::crm::{ContactRole, EmailDirection};

    #[test]
    fn empty_contact_list_emits_exactly_one_escape_action() {
        let ctx = ContextBuilder::new("demo").build();
        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_rule, SourceRule::NoContacts);
    }

    #[test]
    fn never_contacted_decision_maker_is_messaged_as_over_30_days() {
        let mut b = ContextBuilder::new("demo");
        b.contacts.push(contact(ContactRole::DecisionMaker));
        let ctx = b.build();
        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_rule, SourceRule::DecisionMakerDisengaged);
        assert!(candidates[0].description.contains("over 30 days"));
    }

    #[test]
    fn recently_emailed_decision_maker_is_quiet() {
        let mut b = ContextBuilder::new("demo");
        let dm = contact(ContactRole::DecisionMaker);
        let deal_id = b.deal.id;
        let now = b.now;
        b.emails.push(email(deal_id, EmailDirection::Sent, now.minus_days(10), Some(dm.id)));
        b.contacts.push(dm);
        let ctx = b.build();
        assert!(evaluate(&ctx).is_empty());
    }

    #[test]
    fn decision_maker_boundary_is_strictly_over_14_days() {
        let mut b = ContextBuilder::new("demo");
        let dm = contact(ContactRole::DecisionMaker);
        let deal_id = b.deal.id;
        let now = b.now;
        b.emails.push(email(deal_id, EmailDirection::Sent, now.minus_days(14), Some(dm.id)));
        b.contacts.push(dm);
        let ctx = b.build();
        assert!(evaluate(&ctx).is_empty(), "exactly 14 days is not disengaged");
    }

    #[test]
    fn champion_threshold_is_tighter_than_decision_maker() {
        let mut b = ContextBuilder::new("demo");
        let champ = contact(ContactRole::Champion);
        let deal_id = b.deal.id;
        let now = b.now;
        b.emails.push(email(deal_id, EmailDirection::Sent, now.minus_days(9), Some(champ.id)));
        b.contacts.push(champ);
        let ctx = b.build();
        let candidates = evaluate(&ctx);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_rule, SourceRule::ChampionDisengaged);
        assert!(candidates[0].description.contains("9 days"));
    }

    #[test]
    fn non_stakeholder_contacts_suppress_the_escape_hatch() {
        let mut b = ContextBuilder::new("demo");
        b.contacts.push(contact(ContactRole::EndUser));
        let ctx = b.build();
        // Contacts exist, so no escape action and no per-role checks.
        assert!(evaluate(&ctx).is_empty());
    }
}
