//! In-memory action and suggestion stores.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::action::{Action, ActionSuggestion, CompletionRecord, SuggestionStatus};
use crate::domain::foundation::{
    ActionId, DealId, DomainError, ErrorCode, OwnerScope, ScopedRecord, SuggestionId,
};
use crate::ports::{ActionStore, SuggestionStore};

#[derive(Default)]
pub struct InMemoryActionStore {
    actions: RwLock<HashMap<ActionId, Action>>,
}

#[async_trait]
impl ActionStore for InMemoryActionStore {
    async fn insert(&self, action: &Action) -> Result<(), DomainError> {
        self.actions.write().unwrap().insert(action.id, action.clone());
        Ok(())
    }

    async fn find(&self, id: ActionId, scope: &OwnerScope) -> Result<Action, DomainError> {
        self.actions
            .read()
            .unwrap()
            .get(&id)
            .filter(|a| a.in_scope(scope))
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ActionNotFound, format!("Action {} not found", id))
            })
    }

    async fn list_open_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Action>, DomainError> {
        let mut open: Vec<Action> = self
            .actions
            .read()
            .unwrap()
            .values()
            .filter(|a| a.deal_id == deal_id && a.in_scope(scope) && a.is_open())
            .cloned()
            .collect();
        open.sort_by_key(|a| a.created_at);
        Ok(open)
    }

    async fn open_titles_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<String>, DomainError> {
        Ok(self
            .list_open_for_deal(deal_id, scope)
            .await?
            .iter()
            .map(Action::normalized_title)
            .collect())
    }

    async fn complete_if_open(
        &self,
        id: ActionId,
        record: CompletionRecord,
        scope: &OwnerScope,
    ) -> Result<bool, DomainError> {
        let mut actions = self.actions.write().unwrap();
        let action = actions
            .get_mut(&id)
            .filter(|a| a.in_scope(scope))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ActionNotFound, format!("Action {} not found", id))
            })?;
        if !action.is_open() {
            return Ok(false);
        }
        action.complete(record);
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemorySuggestionStore {
    suggestions: RwLock<HashMap<SuggestionId, ActionSuggestion>>,
}

impl InMemorySuggestionStore {
    pub fn pending_count(&self) -> usize {
        self.suggestions.read().unwrap().values().filter(|s| s.is_pending()).count()
    }

    pub fn first_pending_id(&self) -> Option<SuggestionId> {
        self.suggestions
            .read()
            .unwrap()
            .values()
            .filter(|s| s.is_pending())
            .min_by_key(|s| s.created_at)
            .map(|s| s.id)
    }
}

#[async_trait]
impl SuggestionStore for InMemorySuggestionStore {
    async fn insert_if_absent(
        &self,
        suggestion: &ActionSuggestion,
    ) -> Result<bool, DomainError> {
        let mut suggestions = self.suggestions.write().unwrap();
        let duplicate = suggestions.values().any(|s| {
            s.is_pending()
                && s.action_id == suggestion.action_id
                && s.evidence == suggestion.evidence
        });
        if duplicate {
            return Ok(false);
        }
        suggestions.insert(suggestion.id, suggestion.clone());
        Ok(true)
    }

    async fn find(
        &self,
        id: SuggestionId,
        scope: &OwnerScope,
    ) -> Result<ActionSuggestion, DomainError> {
        self.suggestions
            .read()
            .unwrap()
            .get(&id)
            .filter(|s| s.in_scope(scope))
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SuggestionNotFound,
                    format!("Suggestion {} not found", id),
                )
            })
    }

    async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
        scope: &OwnerScope,
    ) -> Result<(), DomainError> {
        let mut suggestions = self.suggestions.write().unwrap();
        let suggestion = suggestions
            .get_mut(&id)
            .filter(|s| s.in_scope(scope))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SuggestionNotFound,
                    format!("Suggestion {} not found", id),
                )
            })?;
        suggestion.status = status;
        Ok(())
    }
}
