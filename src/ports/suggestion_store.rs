//! Suggestion store port (write side).

use async_trait::async_trait;

use crate::domain::action::{ActionSuggestion, SuggestionStatus};
use crate::domain::foundation::{DomainError, OwnerScope, SuggestionId};

/// Persistence for pending completion suggestions.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Save a suggestion unless a pending one already exists for the
    /// same action and evidence.
    ///
    /// Returns `true` if the suggestion was inserted, `false` if an
    /// equivalent pending suggestion made this call a no-op. Re-running
    /// detection over the same evidence must not pile up duplicates.
    async fn insert_if_absent(&self, suggestion: &ActionSuggestion)
        -> Result<bool, DomainError>;

    /// Fetch one suggestion by id.
    ///
    /// # Errors
    ///
    /// - `SuggestionNotFound` if it does not exist in the scope
    async fn find(
        &self,
        id: SuggestionId,
        scope: &OwnerScope,
    ) -> Result<ActionSuggestion, DomainError>;

    /// Record a terminal status for a suggestion.
    ///
    /// # Errors
    ///
    /// - `SuggestionNotFound` if it does not exist in the scope
    /// - `DatabaseError` on persistence failure
    async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
        scope: &OwnerScope,
    ) -> Result<(), DomainError>;
}
