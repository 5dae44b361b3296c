//! PostgreSQL implementation of SuggestionStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::action::{ActionSuggestion, SuggestionStatus};
use crate::domain::foundation::{DomainError, ErrorCode, OwnerScope, SuggestionId};
use crate::ports::SuggestionStore;

pub struct PostgresSuggestionStore {
    pool: PgPool,
}

impl PostgresSuggestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<ActionSuggestion, DomainError> {
        serde_json::from_value(row.get("payload")).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to deserialize suggestion payload: {}", e),
            )
        })
    }

    fn status_str(status: SuggestionStatus) -> &'static str {
        match status {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Accepted => "accepted",
            SuggestionStatus::Dismissed => "dismissed",
        }
    }
}

#[async_trait]
impl SuggestionStore for PostgresSuggestionStore {
    async fn insert_if_absent(
        &self,
        suggestion: &ActionSuggestion,
    ) -> Result<bool, DomainError> {
        let evidence = serde_json::to_value(suggestion.evidence).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize evidence: {}", e),
            )
        })?;
        let payload = serde_json::to_value(suggestion).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize suggestion: {}", e),
            )
        })?;

        // Relies on the partial unique index over (action_id, evidence)
        // WHERE status = 'pending'; the conflict target makes re-scans
        // of the same evidence a no-op.
        let result = sqlx::query(
            r#"
            INSERT INTO action_suggestions
                (id, action_id, user_id, org_id, status, evidence, created_at, payload)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (action_id, evidence) WHERE status = 'pending' DO NOTHING
            "#,
        )
        .bind(suggestion.id.as_uuid())
        .bind(suggestion.action_id.as_uuid())
        .bind(suggestion.scope.user_id.as_str())
        .bind(suggestion.scope.org_id.as_str())
        .bind(Self::status_str(suggestion.status))
        .bind(evidence)
        .bind(suggestion.created_at.as_datetime())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert suggestion: {}", e),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn find(
        &self,
        id: SuggestionId,
        scope: &OwnerScope,
    ) -> Result<ActionSuggestion, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT payload FROM action_suggestions
            WHERE id = $1 AND user_id = $2 AND org_id = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load suggestion: {}", e),
            )
        })?;

        match row {
            Some(row) => Self::decode(&row),
            None => Err(DomainError::new(
                ErrorCode::SuggestionNotFound,
                format!("Suggestion not found: {}", id),
            )),
        }
    }

    async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
        scope: &OwnerScope,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE action_suggestions
            SET status = $4,
                payload = jsonb_set(payload, '{status}', to_jsonb($4::text))
            WHERE id = $1 AND user_id = $2 AND org_id = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .bind(Self::status_str(status))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update suggestion status: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SuggestionNotFound,
                format!("Suggestion not found: {}", id),
            ));
        }
        Ok(())
    }
}
