//! Meeting records synced from the user's calendar.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DealId, MeetingId, Timestamp};

/// Lifecycle status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Canceled,
}

/// A meeting linked to a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub deal_id: DealId,
    pub title: String,
    pub description: String,
    pub status: MeetingStatus,
    pub starts_at: Timestamp,
}

impl Meeting {
    /// A meeting counts as held once its status is completed and its
    /// start time is in the past.
    pub fn is_completed(&self, now: &Timestamp) -> bool {
        self.status == MeetingStatus::Completed && !self.starts_at.is_after(now)
    }

    /// Scheduled and still in the future.
    pub fn is_upcoming(&self, now: &Timestamp) -> bool {
        self.status == MeetingStatus::Scheduled && self.starts_at.is_after(now)
    }

    /// Title and description concatenated for content matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DealId;

    fn meeting(status: MeetingStatus, starts_at: Timestamp) -> Meeting {
        Meeting {
            id: MeetingId::new(),
            deal_id: DealId::new(),
            title: "Demo".to_string(),
            description: "Product walkthrough".to_string(),
            status,
            starts_at,
        }
    }

    #[test]
    fn past_completed_meeting_is_completed() {
        let now = Timestamp::now();
        let m = meeting(MeetingStatus::Completed, now.minus_days(1));
        assert!(m.is_completed(&now));
        assert!(!m.is_upcoming(&now));
    }

    #[test]
    fn future_scheduled_meeting_is_upcoming() {
        let now = Timestamp::now();
        let m = meeting(MeetingStatus::Scheduled, now.add_days(1));
        assert!(m.is_upcoming(&now));
        assert!(!m.is_completed(&now));
    }

    #[test]
    fn canceled_meeting_is_neither() {
        let now = Timestamp::now();
        let m = meeting(MeetingStatus::Canceled, now.add_days(1));
        assert!(!m.is_upcoming(&now));
        assert!(!m.is_completed(&now));
    }
}
