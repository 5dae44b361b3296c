//! Playbook source port.

use async_trait::async_trait;

use crate::domain::crm::DealStage;
use crate::domain::foundation::{DomainError, OwnerScope};

/// Supplies the configured key actions for a deal stage.
///
/// Playbooks are org-level configuration; an empty list is a valid
/// answer for a stage with no playbook.
#[async_trait]
pub trait PlaybookSource: Send + Sync {
    /// Key-action texts for the given stage, in configured order.
    async fn key_actions_for_stage(
        &self,
        stage: &DealStage,
        scope: &OwnerScope,
    ) -> Result<Vec<String>, DomainError>;
}
