//! In-memory CRM reader.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::crm::{Account, Contact, Deal, DealFile, Email, Meeting};
use crate::domain::foundation::{
    AccountId, DealId, DomainError, EmailId, ErrorCode, MeetingId, OwnerScope, ScopedRecord,
};
use crate::ports::CrmReader;

/// CRM records held in process-local maps.
///
/// Seed methods take `&self`; the maps are behind locks so a seeded
/// instance can be shared across handlers in tests.
#[derive(Default)]
pub struct InMemoryCrm {
    deals: RwLock<HashMap<DealId, Deal>>,
    accounts: RwLock<HashMap<AccountId, Account>>,
    contacts: RwLock<HashMap<DealId, Vec<Contact>>>,
    meetings: RwLock<HashMap<MeetingId, Meeting>>,
    emails: RwLock<HashMap<EmailId, Email>>,
    files: RwLock<HashMap<DealId, Vec<DealFile>>>,
}

impl InMemoryCrm {
    pub fn seed_deal(&self, deal: Deal) {
        self.deals.write().unwrap().insert(deal.id, deal);
    }

    pub fn seed_account(&self, account: Account) {
        self.accounts.write().unwrap().insert(account.id, account);
    }

    pub fn seed_contact(&self, deal_id: DealId, contact: Contact) {
        self.contacts.write().unwrap().entry(deal_id).or_default().push(contact);
    }

    pub fn seed_meeting(&self, meeting: Meeting) {
        self.meetings.write().unwrap().insert(meeting.id, meeting);
    }

    pub fn seed_email(&self, email: Email) {
        self.emails.write().unwrap().insert(email.id, email);
    }

    pub fn seed_file(&self, file: DealFile) {
        self.files.write().unwrap().entry(file.deal_id).or_default().push(file);
    }

    /// Child records carry no scope of their own; they are visible
    /// exactly when their owning deal is.
    fn deal_in_scope(&self, deal_id: DealId, scope: &OwnerScope) -> bool {
        self.deals
            .read()
            .unwrap()
            .get(&deal_id)
            .is_some_and(|deal| deal.in_scope(scope))
    }
}

#[async_trait]
impl CrmReader for InMemoryCrm {
    async fn find_deal(&self, id: DealId, scope: &OwnerScope) -> Result<Deal, DomainError> {
        self.deals
            .read()
            .unwrap()
            .get(&id)
            .filter(|deal| deal.in_scope(scope))
            .cloned()
            .ok_or_else(|| DomainError::deal_not_found(id))
    }

    async fn find_account(
        &self,
        id: AccountId,
        scope: &OwnerScope,
    ) -> Result<Account, DomainError> {
        // An account is visible through any in-scope deal that points
        // at it.
        let visible = self
            .deals
            .read()
            .unwrap()
            .values()
            .any(|deal| deal.account_id == id && deal.in_scope(scope));
        if !visible {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Account {} not found", id),
            ));
        }
        self.accounts
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, format!("Account {} not found", id)))
    }

    async fn contacts_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Contact>, DomainError> {
        if !self.deal_in_scope(deal_id, scope) {
            return Ok(Vec::new());
        }
        Ok(self.contacts.read().unwrap().get(&deal_id).cloned().unwrap_or_default())
    }

    async fn meetings_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Meeting>, DomainError> {
        if !self.deal_in_scope(deal_id, scope) {
            return Ok(Vec::new());
        }
        Ok(self
            .meetings
            .read()
            .unwrap()
            .values()
            .filter(|m| m.deal_id == deal_id)
            .cloned()
            .collect())
    }

    async fn emails_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<Email>, DomainError> {
        if !self.deal_in_scope(deal_id, scope) {
            return Ok(Vec::new());
        }
        Ok(self
            .emails
            .read()
            .unwrap()
            .values()
            .filter(|e| e.deal_id == deal_id)
            .cloned()
            .collect())
    }

    async fn files_for_deal(
        &self,
        deal_id: DealId,
        scope: &OwnerScope,
    ) -> Result<Vec<DealFile>, DomainError> {
        if !self.deal_in_scope(deal_id, scope) {
            return Ok(Vec::new());
        }
        Ok(self.files.read().unwrap().get(&deal_id).cloned().unwrap_or_default())
    }

    async fn find_email(&self, id: EmailId, scope: &OwnerScope) -> Result<Email, DomainError> {
        self.emails
            .read()
            .unwrap()
            .get(&id)
            .filter(|e| self.deal_in_scope(e.deal_id, scope))
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::EmailNotFound, format!("Email {} not found", id)))
    }

    async fn find_meeting(
        &self,
        id: MeetingId,
        scope: &OwnerScope,
    ) -> Result<Meeting, DomainError> {
        self.meetings
            .read()
            .unwrap()
            .get(&id)
            .filter(|m| self.deal_in_scope(m.deal_id, scope))
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::MeetingNotFound, format!("Meeting {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crm::{DealStage, EmailDirection, MeetingStatus};
    use crate::domain::foundation::{OrgId, Timestamp, UserId};

    fn scope(user: &str, org: &str) -> OwnerScope {
        OwnerScope::new(UserId::new(user).unwrap(), OrgId::new(org).unwrap())
    }

    fn seeded_crm() -> (InMemoryCrm, DealId, EmailId, MeetingId) {
        let crm = InMemoryCrm::default();
        let deal = Deal {
            id: DealId::new(),
            account_id: AccountId::new(),
            name: "Acme expansion".to_string(),
            stage: DealStage::new("proposal"),
            value: None,
            close_date: None,
            updated_at: Timestamp::now(),
            health_score: None,
            health_breakdown_raw: None,
            scope: scope("rep-1", "org-1"),
        };
        let deal_id = deal.id;
        let email = Email {
            id: EmailId::new(),
            deal_id,
            contact_id: None,
            direction: EmailDirection::Sent,
            subject: "Pricing".to_string(),
            body: "Numbers inside.".to_string(),
            sent_at: Timestamp::now(),
            has_attachment: false,
        };
        let email_id = email.id;
        let meeting = Meeting {
            id: MeetingId::new(),
            deal_id,
            title: "Demo".to_string(),
            description: "Walkthrough".to_string(),
            status: MeetingStatus::Completed,
            starts_at: Timestamp::now().minus_days(1),
        };
        let meeting_id = meeting.id;
        crm.seed_deal(deal);
        crm.seed_email(email);
        crm.seed_meeting(meeting);
        (crm, deal_id, email_id, meeting_id)
    }

    #[tokio::test]
    async fn owner_scope_reads_child_records() {
        let (crm, deal_id, email_id, meeting_id) = seeded_crm();
        let owner = scope("rep-1", "org-1");
        assert!(crm.find_email(email_id, &owner).await.is_ok());
        assert!(crm.find_meeting(meeting_id, &owner).await.is_ok());
        assert_eq!(crm.emails_for_deal(deal_id, &owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn foreign_scope_cannot_read_emails_or_meetings() {
        let (crm, deal_id, email_id, meeting_id) = seeded_crm();
        let foreign = scope("rep-2", "org-2");

        let err = crm.find_email(email_id, &foreign).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailNotFound);
        let err = crm.find_meeting(meeting_id, &foreign).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MeetingNotFound);

        assert!(crm.emails_for_deal(deal_id, &foreign).await.unwrap().is_empty());
        assert!(crm.meetings_for_deal(deal_id, &foreign).await.unwrap().is_empty());
        assert!(crm.files_for_deal(deal_id, &foreign).await.unwrap().is_empty());
        assert!(crm.contacts_for_deal(deal_id, &foreign).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_org_different_user_is_still_foreign() {
        let (crm, _, email_id, _) = seeded_crm();
        let colleague = scope("rep-2", "org-1");
        assert!(crm.find_email(email_id, &colleague).await.is_err());
    }

    #[tokio::test]
    async fn account_resolves_only_through_an_in_scope_deal() {
        let (crm, deal_id, _, _) = seeded_crm();
        let account_id = crm.find_deal(deal_id, &scope("rep-1", "org-1")).await.unwrap().account_id;
        crm.seed_account(Account { id: account_id, name: "Acme".to_string() });

        assert!(crm.find_account(account_id, &scope("rep-1", "org-1")).await.is_ok());
        assert!(crm.find_account(account_id, &scope("rep-2", "org-2")).await.is_err());
    }
}
