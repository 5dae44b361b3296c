//! Deterministic action-generation rules.
//!
//! Seven independent rule groups inspect the same context snapshot and
//! emit candidates; no group observes another's output. Results are
//! concatenated in a fixed order and deduplicated by normalized title,
//! first occurrence winning, so the whole pass is deterministic and
//! order-stable.

mod contacts;
mod emails;
mod files;
mod health;
mod meetings;
mod playbook;
mod stage;

use std::collections::HashSet;

use crate::domain::action::ActionCandidate;
use crate::domain::context::DealContext;

/// Runs every rule group against the context.
///
/// Pure function of the context. Groups are order-independent; only the
/// terminal dedup depends on concatenation order.
pub fn generate(ctx: &DealContext) -> Vec<ActionCandidate> {
    let mut candidates = Vec::new();
    candidates.extend(health::evaluate(ctx));
    candidates.extend(stage::evaluate(ctx));
    candidates.extend(contacts::evaluate(ctx));
    candidates.extend(meetings::evaluate(ctx));
    candidates.extend(emails::evaluate(ctx));
    candidates.extend(files::evaluate(ctx));
    candidates.extend(playbook::evaluate(ctx));
    dedup_by_title(candidates)
}

/// Drops candidates whose normalized title was already seen.
pub fn dedup_by_title(candidates: Vec<ActionCandidate>) -> Vec<ActionCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.normalized_title()))
        .collect()
}
