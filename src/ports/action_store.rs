//! Action store port (write side).

use async_trait::async_trait;

use crate::domain::action::{Action, CompletionRecord};
use crate::domain::foundation::{ActionId, DealId, DomainError, OwnerScope};

/// Persistence for generated actions.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Save a new action.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, action: &Action) -> Result<(), DomainError>;

    /// Fetch one action by id.
    ///
    /// # Errors
    ///
    /// - `ActionNotFound` if the action does not exist in the scope
    async fn find(&self, id: ActionId, scope: &OwnerScope) -> Result<Action, DomainError>;

    /// Open (not yet completed) actions for a deal, oldest first.
    async fn list_open_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Action>, DomainError>;

    /// Open action titles for a deal, normalized, for generation-time
    /// dedup against what already exists.
    async fn open_titles_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<String>, DomainError>;

    /// Completes an action only if it is still open.
    ///
    /// Returns `true` if this call performed the completion, `false`
    /// if the action was already completed by someone else. Two
    /// concurrent detections of the same action must resolve to
    /// exactly one `true`.
    ///
    /// # Errors
    ///
    /// - `ActionNotFound` if the action does not exist in the scope
    /// - `DatabaseError` on persistence failure
    async fn complete_if_open(
        &self,
        id: ActionId,
        record: CompletionRecord,
        scope: &OwnerScope,
    ) -> Result<bool, DomainError>;
}
