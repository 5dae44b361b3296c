//! Email records synced from the user's mailbox.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContactId, DealId, EmailId, Timestamp};

/// Direction of an email relative to the deal owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDirection {
    Sent,
    Received,
}

/// An email linked to a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub deal_id: DealId,
    /// Contact the email was exchanged with, when the sync job could
    /// attribute it.
    pub contact_id: Option<ContactId>,
    pub direction: EmailDirection,
    pub subject: String,
    pub body: String,
    pub sent_at: Timestamp,
    pub has_attachment: bool,
}

impl Email {
    pub fn is_sent(&self) -> bool {
        self.direction == EmailDirection::Sent
    }

    /// Subject and body concatenated for content matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ContactId, DealId, EmailId};

    fn email(direction: EmailDirection) -> Email {
        Email {
            id: EmailId::new(),
            deal_id: DealId::new(),
            contact_id: Some(ContactId::new()),
            direction,
            subject: "Proposal".to_string(),
            body: "Attached is the deck".to_string(),
            sent_at: Timestamp::now(),
            has_attachment: true,
        }
    }

    #[test]
    fn sent_direction_is_sent() {
        assert!(email(EmailDirection::Sent).is_sent());
        assert!(!email(EmailDirection::Received).is_sent());
    }

    #[test]
    fn searchable_text_joins_subject_and_body() {
        assert_eq!(
            email(EmailDirection::Sent).searchable_text(),
            "Proposal Attached is the deck"
        );
    }
}
