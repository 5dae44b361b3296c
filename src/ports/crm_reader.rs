//! CRM reader port (read side).
//!
//! One trait covers every CRM lookup the context builder needs, so a
//! single adapter can answer from one database or one upstream API.

use async_trait::async_trait;

use crate::domain::crm::{Account, Contact, Deal, DealFile, Email, Meeting};
use crate::domain::foundation::{AccountId, DealId, DomainError, EmailId, MeetingId, OwnerScope};

/// Read-only access to CRM records, always scoped to an owner.
#[async_trait]
pub trait CrmReader: Send + Sync {
    /// Fetch a deal by id.
    ///
    /// # Errors
    ///
    /// - `DealNotFound` if the deal does not exist in the scope
    /// - `DatabaseError` on lookup failure
    async fn find_deal(&self, id: DealId, scope: &OwnerScope) -> Result<Deal, DomainError>;

    /// Fetch the account a deal belongs to.
    async fn find_account(&self, id: AccountId, scope: &OwnerScope)
        -> Result<Account, DomainError>;

    /// All contacts linked to a deal.
    async fn contacts_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Contact>, DomainError>;

    /// All meetings for a deal, any status.
    async fn meetings_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Meeting>, DomainError>;

    /// All emails for a deal, both directions.
    async fn emails_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Email>, DomainError>;

    /// All files linked to a deal.
    async fn files_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<DealFile>, DomainError>;

    /// Fetch one email, for evidence-driven detection entry points.
    ///
    /// # Errors
    ///
    /// - `EmailNotFound` if the email does not exist in the scope
    async fn find_email(&self, id: EmailId, scope: &OwnerScope) -> Result<Email, DomainError>;

    /// Fetch one meeting, for evidence-driven detection entry points.
    ///
    /// # Errors
    ///
    /// - `MeetingNotFound` if the meeting does not exist in the scope
    async fn find_meeting(&self, id: MeetingId, scope: &OwnerScope)
        -> Result<Meeting, DomainError>;
}
