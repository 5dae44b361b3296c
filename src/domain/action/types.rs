//! Closed enums shared across the action pipeline.

use serde::{Deserialize, Serialize};

/// What kind of work an action asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    EmailSend,
    MeetingSchedule,
    DocumentPrep,
    TaskComplete,
    FollowUp,
    Manual,
}

/// Priority of an action.
///
/// `Critical` is consumed by calendar/detection downstreams but never
/// emitted by the rules engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl ActionPriority {
    pub fn label(&self) -> &'static str {
        match self {
            ActionPriority::Critical => "Critical",
            ActionPriority::High => "High",
            ActionPriority::Medium => "Medium",
            ActionPriority::Low => "Low",
        }
    }
}

/// Where an action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    AutoGenerated,
    Playbook,
}

/// Communication channel assigned to an action.
///
/// Drives UI routing and completion-detection strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Email,
    Call,
    Whatsapp,
    Linkedin,
    Slack,
    Document,
    InternalTask,
}

impl NextStep {
    /// All seven channels, for totality checks in tests.
    pub const ALL: [NextStep; 7] = [
        NextStep::Email,
        NextStep::Call,
        NextStep::Whatsapp,
        NextStep::Linkedin,
        NextStep::Slack,
        NextStep::Document,
        NextStep::InternalTask,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_critical_first() {
        assert!(ActionPriority::Critical < ActionPriority::High);
        assert!(ActionPriority::High < ActionPriority::Medium);
        assert!(ActionPriority::Medium < ActionPriority::Low);
    }

    #[test]
    fn next_step_serializes_snake_case() {
        let json = serde_json::to_string(&NextStep::InternalTask).unwrap();
        assert_eq!(json, "\"internal_task\"");
    }

    #[test]
    fn action_type_round_trips() {
        let json = serde_json::to_string(&ActionType::MeetingSchedule).unwrap();
        let back: ActionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ActionType::MeetingSchedule);
    }
}
