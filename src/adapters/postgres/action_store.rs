//! PostgreSQL implementation of ActionStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::action::{Action, CompletionRecord};
use crate::domain::foundation::{ActionId, DealId, DomainError, ErrorCode, OwnerScope};
use crate::ports::ActionStore;

pub struct PostgresActionStore {
    pool: PgPool,
}

impl PostgresActionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<Action, DomainError> {
        serde_json::from_value(row.get("payload")).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to deserialize action payload: {}", e),
            )
        })
    }

    fn encode(action: &Action) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(action).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize action: {}", e),
            )
        })
    }

    fn db_err(context: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
        move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
    }
}

#[async_trait]
impl ActionStore for PostgresActionStore {
    async fn insert(&self, action: &Action) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO actions
                (id, deal_id, user_id, org_id, title_normalized, completed, created_at, payload)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(action.id.as_uuid())
        .bind(action.deal_id.as_uuid())
        .bind(action.scope.user_id.as_str())
        .bind(action.scope.org_id.as_str())
        .bind(action.normalized_title())
        .bind(action.completed)
        .bind(action.created_at.as_datetime())
        .bind(Self::encode(action)?)
        .execute(&self.pool)
        .await
        .map_err(Self::db_err("Failed to insert action"))?;
        Ok(())
    }

    async fn find(&self, id: ActionId, scope: &OwnerScope) -> Result<Action, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT payload FROM actions
            WHERE id = $1 AND user_id = $2 AND org_id = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err("Failed to load action"))?;

        match row {
            Some(row) => Self::decode(&row),
            None => Err(DomainError::new(
                ErrorCode::ActionNotFound,
                format!("Action not found: {}", id),
            )),
        }
    }

    async fn list_open_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Action>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT payload FROM actions
            WHERE deal_id = $1 AND user_id = $2 AND org_id = $3 AND completed = FALSE
            ORDER BY created_at ASC
            "#,
        )
        .bind(deal_id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list open actions"))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn open_titles_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<String>, DomainError> {
        let titles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT title_normalized FROM actions
            WHERE deal_id = $1 AND user_id = $2 AND org_id = $3 AND completed = FALSE
            "#,
        )
        .bind(deal_id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list open action titles"))?;
        Ok(titles)
    }

    async fn complete_if_open(
        &self,
        id: ActionId,
        record: CompletionRecord,
        scope: &OwnerScope,
    ) -> Result<bool, DomainError> {
        let mut action = self.find(id, scope).await?;
        if !action.is_open() {
            return Ok(false);
        }
        action.complete(record);

        // The WHERE clause carries the race: of two concurrent
        // completions exactly one update matches a still-open row.
        let result = sqlx::query(
            r#"
            UPDATE actions
            SET completed = TRUE, payload = $4
            WHERE id = $1 AND user_id = $2 AND org_id = $3 AND completed = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(scope.user_id.as_str())
        .bind(scope.org_id.as_str())
        .bind(Self::encode(&action)?)
        .execute(&self.pool)
        .await
        .map_err(Self::db_err("Failed to complete action"))?;

        Ok(result.rows_affected() == 1)
    }
}
