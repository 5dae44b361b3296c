//! Per-deal context snapshot.
//!
//! Built fresh for every generation run, immutable afterwards. Holds the
//! fetched records plus the pre-computed derived signals every rule
//! group reads.

mod derived;

pub use derived::DerivedSignals;

use crate::domain::crm::{Account, Contact, Deal, DealFile, Email, Meeting};
use crate::domain::foundation::{ContactId, Timestamp};
use crate::domain::health::{HealthBreakdown, HealthConfig};

/// Everything needed to evaluate one deal.
#[derive(Debug, Clone)]
pub struct DealContext {
    pub deal: Deal,
    pub account: Account,
    pub contacts: Vec<Contact>,
    pub meetings: Vec<Meeting>,
    pub emails: Vec<Email>,
    pub files: Vec<DealFile>,
    /// Parsed health-score breakdown; `None` when the deal has none
    /// stored or the stored value is unparseable.
    pub breakdown: Option<HealthBreakdown>,
    /// Playbook key-actions for the deal's current stage. Empty when no
    /// playbook is configured.
    pub playbook_actions: Vec<String>,
    pub health_config: HealthConfig,
    /// Generation time; all derived signals are relative to this.
    pub now: Timestamp,
    pub derived: DerivedSignals,
}

impl DealContext {
    /// Assembles the snapshot from fetched records and computes derived
    /// signals. Pure aside from reading `now` from the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        deal: Deal,
        account: Account,
        contacts: Vec<Contact>,
        meetings: Vec<Meeting>,
        emails: Vec<Email>,
        files: Vec<DealFile>,
        playbook_actions: Vec<String>,
        health_config: HealthConfig,
        now: Timestamp,
    ) -> Self {
        let breakdown = deal
            .health_breakdown_raw
            .as_ref()
            .and_then(HealthBreakdown::parse);
        let derived = DerivedSignals::compute(
            &deal,
            &contacts,
            &meetings,
            &emails,
            &files,
            &health_config,
            &now,
        );
        Self {
            deal,
            account,
            contacts,
            meetings,
            emails,
            files,
            breakdown,
            playbook_actions,
            health_config,
            now,
            derived,
        }
    }

    /// Days since the last sent email attributed to the given contact.
    /// `None` when the contact was never emailed.
    pub fn days_since_sent_to(&self, contact_id: ContactId) -> Option<i64> {
        self.derived
            .sent_emails
            .iter()
            .filter(|e| e.contact_id == Some(contact_id))
            .map(|e| e.sent_at)
            .max()
            .map(|at| self.now.days_since(&at))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Context construction helpers shared by rule-group tests.

    use serde_json::Value;

    use crate::domain::crm::{
        Account, Contact, ContactRole, Deal, DealFile, DealStage, Email, EmailDirection,
        FileStatus, Meeting, MeetingStatus,
    };
    use crate::domain::foundation::{
        AccountId, ContactId, DealId, EmailId, FileId, MeetingId, OrgId, OwnerScope, Timestamp,
        UserId,
    };
    use crate::domain::health::HealthConfig;

    use super::DealContext;

    pub fn scope() -> OwnerScope {
        OwnerScope::new(UserId::new("u1").unwrap(), OrgId::new("o1").unwrap())
    }

    pub fn deal(stage: &str, now: Timestamp) -> Deal {
        Deal {
            id: DealId::new(),
            account_id: AccountId::new(),
            name: "Acme expansion".to_string(),
            stage: DealStage::new(stage),
            value: Some(50_000),
            close_date: Some(now.add_days(30)),
            updated_at: now.minus_days(1),
            health_score: Some(70),
            health_breakdown_raw: None,
            scope: scope(),
        }
    }

    pub fn contact(role: ContactRole) -> Contact {
        Contact {
            id: ContactId::new(),
            name: "Jordan Reyes".to_string(),
            email: Some("jordan@acme.example".to_string()),
            role,
        }
    }

    pub fn email(
        deal_id: DealId,
        direction: EmailDirection,
        sent_at: Timestamp,
        contact_id: Option<ContactId>,
    ) -> Email {
        Email {
            id: EmailId::new(),
            deal_id,
            contact_id,
            direction,
            subject: "Re: next steps".to_string(),
            body: "Details inside".to_string(),
            sent_at,
            has_attachment: false,
        }
    }

    pub fn meeting(deal_id: DealId, status: MeetingStatus, starts_at: Timestamp) -> Meeting {
        Meeting {
            id: MeetingId::new(),
            deal_id,
            title: "Discovery".to_string(),
            description: "Initial scoping".to_string(),
            status,
            starts_at,
        }
    }

    pub fn file(deal_id: DealId, filename: &str, status: FileStatus) -> DealFile {
        DealFile {
            id: FileId::new(),
            deal_id,
            filename: filename.to_string(),
            processing_status: status,
        }
    }

    /// A context with the given pieces; everything else empty.
    pub struct ContextBuilder {
        pub deal: Deal,
        pub contacts: Vec<Contact>,
        pub meetings: Vec<Meeting>,
        pub emails: Vec<Email>,
        pub files: Vec<DealFile>,
        pub playbook_actions: Vec<String>,
        pub now: Timestamp,
    }

    impl ContextBuilder {
        pub fn new(stage: &str) -> Self {
            let now = Timestamp::now();
            Self {
                deal: deal(stage, now),
                contacts: Vec::new(),
                meetings: Vec::new(),
                emails: Vec::new(),
                files: Vec::new(),
                playbook_actions: Vec::new(),
                now,
            }
        }

        pub fn breakdown(mut self, raw: Value) -> Self {
            self.deal.health_breakdown_raw = Some(raw);
            self
        }

        pub fn build(self) -> DealContext {
            DealContext::assemble(
                self.deal,
                Account { id: AccountId::new(), name: "Acme".to_string() },
                self.contacts,
                self.meetings,
                self.emails,
                self.files,
                self.playbook_actions,
                HealthConfig::default(),
                self.now,
            )
        }
    }
}
