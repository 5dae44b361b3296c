//! File rules: missing documents and failed imports.

use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
use crate::domain::context::DealContext;

pub(super) fn evaluate(ctx: &DealContext) -> Vec<ActionCandidate> {
    let mut out = Vec::new();

    if ctx.files.is_empty() && ctx.deal.stage.expects_files() {
        out.push(base(
            ctx,
            "Upload supporting documents",
            "An active-stage deal has no linked files.",
            ActionType::TaskComplete,
            ActionPriority::Medium,
            3,
            SourceRule::NoFiles,
        ));
    }

    for file in &ctx.derived.failed_files {
        out.push(base(
            ctx,
            &format!("Retry import for {}", file.filename),
            format!("Import of \"{}\" failed; retry or re-link the file.", file.filename),
            ActionType::TaskComplete,
            ActionPriority::Medium,
            1,
            SourceRule::FileImportFailed,
        ));
    }

    let proposal_stage = ctx.deal.stage.contains("proposal") || ctx.deal.stage.contains("negotiation");
    if proposal_stage && !ctx.files.iter().any(|f| f.looks_like_proposal()) {
        out.push(
            base(
                ctx,
                "Prepare the proposal document",
                "No proposal, quote, pricing, SOW or contract document is on file.",
                ActionType::DocumentPrep,
                ActionPriority::High,
                2,
                SourceRule::ProposalDocumentMissing,
            )
            .with_keywords(vec!["proposal".to_string(), "pricing".to_string()]),
        );
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
