//! Pre-computed signals derived from the fetched record lists.
//!
//! All pure functions of the inputs and the generation time. Rule
//! groups read these instead of re-deriving them.

use crate::domain::crm::{Contact, ContactRole, Deal, DealFile, Email, FileStatus, Meeting};
use crate::domain::foundation::Timestamp;
use crate::domain::health::HealthConfig;

/// Sent emails must be at least this old before counting as unanswered.
const UNANSWERED_MIN_AGE_DAYS: i64 = 3;

/// Signals shared by the rule groups.
#[derive(Debug, Clone, Default)]
pub struct DerivedSignals {
    pub completed_meetings: Vec<Meeting>,
    pub upcoming_meetings: Vec<Meeting>,
    pub last_completed_meeting: Option<Meeting>,
    pub days_since_last_meeting: Option<i64>,

    pub sent_emails: Vec<Email>,
    pub received_emails: Vec<Email>,
    pub last_email: Option<Email>,
    pub days_since_last_email: Option<i64>,
    /// Sent emails ≥3 days old with no received email after them,
    /// oldest first.
    pub unanswered_emails: Vec<Email>,

    pub decision_makers: Vec<Contact>,
    pub champions: Vec<Contact>,
    pub stakeholders: Vec<Contact>,

    pub completed_files: Vec<DealFile>,
    pub processing_files: Vec<DealFile>,
    pub failed_files: Vec<DealFile>,

    pub days_in_stage: i64,
    pub days_until_close: Option<i64>,
    pub is_past_close: bool,
    pub closing_imminently: bool,
    pub is_high_value: bool,
    pub is_stagnant: bool,
}

impl DerivedSignals {
    pub fn compute(
        deal: &Deal,
        contacts: &[Contact],
        meetings: &[Meeting],
        emails: &[Email],
        files: &[DealFile],
        config: &HealthConfig,
        now: &Timestamp,
    ) -> Self {
        let mut completed_meetings: Vec<Meeting> =
            meetings.iter().filter(|m| m.is_completed(now)).cloned().collect();
        completed_meetings.sort_by_key(|m| m.starts_at);
        let mut upcoming_meetings: Vec<Meeting> =
            meetings.iter().filter(|m| m.is_upcoming(now)).cloned().collect();
        upcoming_meetings.sort_by_key(|m| m.starts_at);

        let last_completed_meeting = completed_meetings.last().cloned();
        let days_since_last_meeting = last_completed_meeting
            .as_ref()
            .map(|m| now.days_since(&m.starts_at));

        let mut sent_emails: Vec<Email> =
            emails.iter().filter(|e| e.is_sent()).cloned().collect();
        sent_emails.sort_by_key(|e| e.sent_at);
        let mut received_emails: Vec<Email> =
            emails.iter().filter(|e| !e.is_sent()).cloned().collect();
        received_emails.sort_by_key(|e| e.sent_at);

        let last_email = emails.iter().max_by_key(|e| e.sent_at).cloned();
        let days_since_last_email = last_email.as_ref().map(|e| now.days_since(&e.sent_at));

        let unanswered_emails = sent_emails
            .iter()
            .filter(|sent| now.days_since(&sent.sent_at) >= UNANSWERED_MIN_AGE_DAYS)
            .filter(|sent| !received_emails.iter().any(|r| r.sent_at.is_after(&sent.sent_at)))
            .cloned()
            .collect();

        let decision_makers = contacts
            .iter()
            .filter(|c| c.role == ContactRole::DecisionMaker)
            .cloned()
            .collect();
        let champions = contacts
            .iter()
            .filter(|c| c.role == ContactRole::Champion)
            .cloned()
            .collect();
        let stakeholders = contacts
            .iter()
            .filter(|c| c.role.is_stakeholder())
            .cloned()
            .collect();

        let by_status = |status: FileStatus| -> Vec<DealFile> {
            files.iter().filter(|f| f.processing_status == status).cloned().collect()
        };

        let days_in_stage = now.days_since(&deal.updated_at);
        let days_until_close = deal.close_date.as_ref().map(|d| now.days_until(d));
        let is_past_close = days_until_close.is_some_and(|d| d < 0);
        let closing_imminently = days_until_close.is_some_and(|d| (0..=7).contains(&d));
        let is_high_value = deal.value.is_some_and(|v| v > config.high_value_floor);
        let is_stagnant = days_in_stage > config.stagnant_after_days && !deal.stage.is_closed();

        Self {
            completed_meetings,
            upcoming_meetings,
            last_completed_meeting,
            days_since_last_meeting,
            sent_emails,
            received_emails,
            last_email,
            days_since_last_email,
            unanswered_emails,
            decision_makers,
            champions,
            stakeholders,
            completed_files: by_status(FileStatus::Completed),
            processing_files: by_status(FileStatus::Processing),
            failed_files: by_status(FileStatus::Failed),
            days_in_stage,
            days_until_close,
            is_past_close,
            closing_imminently,
            is_high_value,
            is_stagnant,
        }
    }
}
