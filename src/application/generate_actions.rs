//! GenerateActions - command handler for the per-deal generation run.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::domain::action::Action;
use crate::domain::foundation::{DealId, DomainError, OwnerScope, Timestamp};
use crate::domain::rules;
use crate::ports::ActionStore;

use super::ContextBuilder;

/// Command to generate next actions for one deal.
#[derive(Debug, Clone)]
pub struct GenerateActionsCommand {
    pub deal_id: DealId,
    pub scope: OwnerScope,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateActionsResult {
    pub created: Vec<Action>,
    /// Candidates dropped because an open action with the same
    /// normalized title already exists.
    pub skipped_existing: usize,
}

/// Handler for the generation run.
pub struct GenerateActionsHandler {
    context_builder: ContextBuilder,
    action_store: Arc<dyn ActionStore>,
}

impl GenerateActionsHandler {
    pub fn new(context_builder: ContextBuilder, action_store: Arc<dyn ActionStore>) -> Self {
        Self { context_builder, action_store }
    }

    pub async fn handle(
        &self,
        cmd: GenerateActionsCommand,
    ) -> Result<GenerateActionsResult, DomainError> {
        let now = Timestamp::now();

        // 1. Snapshot the deal.
        let ctx = self.context_builder.build(cmd.deal_id, &cmd.scope, now).await?;

        // 2. Run the rules. Pure; already deduplicated within the run.
        let candidates = rules::generate(&ctx);

        // 3. Drop candidates that duplicate an open action.
        let existing: HashSet<String> = self
            .action_store
            .open_titles_for_deal(cmd.deal_id, &cmd.scope)
            .await?
            .into_iter()
            .collect();

        let mut created = Vec::new();
        let mut skipped_existing = 0;
        for candidate in candidates {
            if existing.contains(&candidate.normalized_title()) {
                skipped_existing += 1;
                continue;
            }
            let action = Action::from_candidate(candidate, cmd.scope.clone(), now);
            self.action_store.insert(&action).await?;
            created.push(action);
        }

        info!(
            deal_id = %cmd.deal_id,
            created = created.len(),
            skipped = skipped_existing,
            "action generation run finished"
        );
        Ok(GenerateActionsResult { created, skipped_existing })
    }
}
