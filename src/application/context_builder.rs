//! Context builder - assembles a per-deal snapshot from the read ports.

use std::sync::Arc;

use tracing::warn;

use crate::domain::context::DealContext;
use crate::domain::foundation::{DealId, DomainError, OwnerScope, Timestamp};
use crate::domain::health::HealthConfig;
use crate::ports::{CrmReader, HealthConfigSource, PlaybookSource};

/// Builds [`DealContext`] snapshots.
///
/// Core CRM reads are mandatory and fail the build; playbook and
/// health-config resolution degrade to defaults with a warning, since
/// generation without them is still useful.
pub struct ContextBuilder {
    crm: Arc<dyn CrmReader>,
    playbook: Arc<dyn PlaybookSource>,
    health_config: Arc<dyn HealthConfigSource>,
}

impl ContextBuilder {
    pub fn new(
        crm: Arc<dyn CrmReader>,
        playbook: Arc<dyn PlaybookSource>,
        health_config: Arc<dyn HealthConfigSource>,
    ) -> Self {
        Self { crm, playbook, health_config }
    }

    pub async fn build(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
        now: Timestamp,
    ) -> Result<DealContext, DomainError> {
        // 1. The deal anchors everything else.
        let deal = self.crm.find_deal(deal_id, scope).await?;

        // 2. Fan out everything else. The CRM reads are mandatory and
        //    fail the build; the playbook and health-config lookups
        //    degrade in place rather than fail.
        let (crm_reads, playbook_actions, health_config) = tokio::join!(
            async {
                tokio::try_join!(
                    self.crm.find_account(deal.account_id, scope),
                    self.crm.contacts_for_deal(deal_id, scope),
                    self.crm.meetings_for_deal(deal_id, scope),
                    self.crm.emails_for_deal(deal_id, scope),
                    self.crm.files_for_deal(deal_id, scope),
                )
            },
            async {
                match self.playbook.key_actions_for_stage(&deal.stage, scope).await {
                    Ok(actions) => actions,
                    Err(err) => {
                        warn!(deal_id = %deal_id, error = %err, "playbook lookup failed, generating without playbook actions");
                        Vec::new()
                    }
                }
            },
            async {
                match self.health_config.health_config(scope).await {
                    Ok(config) => config,
                    Err(err) => {
                        warn!(deal_id = %deal_id, error = %err, "health config lookup failed, using defaults");
                        HealthConfig::default()
                    }
                }
            },
        );
        let (account, contacts, meetings, emails, files) = crm_reads?;

        Ok(DealContext::assemble(
            deal,
            account,
            contacts,
            meetings,
            emails,
            files,
            playbook_actions,
            health_config,
            now,
        ))
    }
}
