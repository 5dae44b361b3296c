//! Pure classification helpers for playbook key-actions.
//!
//! A playbook is an org/user-configured set of stage-specific
//! recommended actions in free text. These helpers turn one such string
//! into the structured fields an action candidate needs: a type, a due
//! offset, a priority, keywords and the external-evidence flag.

use once_cell::sync::Lazy;

use super::action::{ActionPriority, ActionType};
use super::crm::DealStage;

/// Ordered keyword buckets for action-type classification. Tested in
/// order; first match wins.
static TYPE_BUCKETS: &[(ActionType, &[&str])] = &[
    (
        ActionType::EmailSend,
        &["email", "send", "reach out", "reply", "respond", "write to"],
    ),
    (
        ActionType::MeetingSchedule,
        &["schedule", "meeting", "call", "demo", "book", "invite"],
    ),
    (
        ActionType::DocumentPrep,
        &["proposal", "deck", "document", "prepare", "draft", "quote", "sow"],
    ),
    (
        ActionType::TaskComplete,
        &["review", "update", "confirm", "verify", "check", "complete"],
    ),
];

/// Fixed domain keywords recognized anywhere in the text.
static DOMAIN_KEYWORDS: &[&str] = &[
    "deck",
    "proposal",
    "demo",
    "security",
    "legal",
    "send",
    "schedule",
    "pricing",
    "quote",
    "contract",
    "sow",
    "budget",
    "timeline",
    "stakeholder",
    "follow",
    "intro",
    "reference",
    "case study",
    "trial",
    "pilot",
    "integration",
    "onboarding",
    "renewal",
    "discount",
    "roi",
];

/// Words too generic to be useful keywords.
static STOPWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "with", "this", "that", "from", "your", "their", "will", "have", "about", "into",
        "them", "then", "when", "what", "each", "every", "should", "would",
    ]
});

/// Maximum keywords returned per action.
const KEYWORD_CAP: usize = 5;

/// Classifies a free-text action into an action type.
pub fn classify_action_type(text: &str) -> ActionType {
    let text = text.to_lowercase();
    for (action_type, keywords) in TYPE_BUCKETS {
        if keywords.iter().any(|k| text.contains(k)) {
            return *action_type;
        }
    }
    ActionType::Manual
}

/// Extracts up to five keywords: fixed domain keywords present as
/// substrings, then the first three content words of the text.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for keyword in DOMAIN_KEYWORDS {
        if lower.contains(keyword) {
            keywords.push((*keyword).to_string());
        }
    }

    let content_words = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(w))
        .take(3);
    for word in content_words {
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }

    keywords.truncate(KEYWORD_CAP);
    keywords
}

/// Whether completing the action leaves externally observable evidence
/// (a sent email, a held meeting) the detector can look for.
pub fn requires_external_evidence(action_type: ActionType, text: &str) -> bool {
    let lower = text.to_lowercase();
    match action_type {
        ActionType::EmailSend | ActionType::MeetingSchedule => {
            !(lower.contains("internal") || lower.contains("team") || lower.contains("preparation"))
        }
        ActionType::DocumentPrep => {
            lower.contains("send") || lower.contains("deliver") || lower.contains("shar")
        }
        _ => false,
    }
}

/// Due-date offset in days, by stage urgency and action type.
pub fn suggest_due_days(stage: &DealStage, action_type: ActionType) -> i64 {
    if stage.is_aggressive() {
        match action_type {
            ActionType::EmailSend => 1,
            ActionType::MeetingSchedule => 2,
            ActionType::DocumentPrep => 2,
            ActionType::TaskComplete => 1,
            ActionType::FollowUp => 1,
            ActionType::Manual => 2,
        }
    } else {
        match action_type {
            ActionType::EmailSend => 2,
            ActionType::MeetingSchedule => 5,
            ActionType::DocumentPrep => 4,
            ActionType::TaskComplete => 3,
            ActionType::FollowUp => 3,
            ActionType::Manual => 5,
        }
    }
}

/// Priority, by stage urgency and action type.
pub fn suggest_priority(stage: &DealStage, action_type: ActionType) -> ActionPriority {
    if stage.is_aggressive() {
        match action_type {
            ActionType::EmailSend
            | ActionType::MeetingSchedule
            | ActionType::DocumentPrep
            | ActionType::FollowUp => ActionPriority::High,
            ActionType::TaskComplete | ActionType::Manual => ActionPriority::Medium,
        }
    } else {
        match action_type {
            ActionType::EmailSend
            | ActionType::MeetingSchedule
            | ActionType::DocumentPrep
            | ActionType::FollowUp => ActionPriority::Medium,
            ActionType::TaskComplete | ActionType::Manual => ActionPriority::Low,
        }
    }
}
