//! Completion-detection types and scoring.
//!
//! Decides whether a sent email or held meeting satisfies a previously
//! generated action: a rules-based heuristic score, an LLM semantic
//! check, or a hybrid arbitration between the two.

pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::domain::action::CompletionSource;
use crate::domain::crm::{Email, EmailDirection, Meeting};

/// Org-level completion-detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    Manual,
    RulesOnly,
    AiOnly,
    Hybrid,
}

/// Per-org detection configuration, resolved fresh per invocation and
/// passed as an immutable value; it never lives in ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub mode: DetectionMode,
    pub detect_from_emails: bool,
    pub detect_from_meetings: bool,
    /// Minimum confidence to record anything at all.
    pub confidence_threshold: u8,
    /// Confidence at which an action is completed without asking.
    pub auto_complete_threshold: u8,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::Hybrid,
            detect_from_emails: true,
            detect_from_meetings: true,
            confidence_threshold: 50,
            auto_complete_threshold: 85,
        }
    }
}

impl DetectionConfig {
    pub fn is_enabled(&self) -> bool {
        self.mode != DetectionMode::Manual
    }
}

/// The searchable content of one piece of evidence.
#[derive(Debug, Clone)]
pub enum EvidenceContent {
    Email {
        direction: EmailDirection,
        has_attachment: bool,
        text: String,
    },
    Meeting {
        text: String,
    },
}

impl EvidenceContent {
    pub fn from_email(email: &Email) -> Self {
        EvidenceContent::Email {
            direction: email.direction,
            has_attachment: email.has_attachment,
            text: email.searchable_text(),
        }
    }

    pub fn from_meeting(meeting: &Meeting) -> Self {
        EvidenceContent::Meeting { text: meeting.searchable_text() }
    }

    pub fn text(&self) -> &str {
        match self {
            EvidenceContent::Email { text, .. } => text,
            EvidenceContent::Meeting { text } => text,
        }
    }

    pub fn is_sent_email(&self) -> bool {
        matches!(
            self,
            EvidenceContent::Email { direction: EmailDirection::Sent, .. }
        )
    }

    pub fn is_email(&self) -> bool {
        matches!(self, EvidenceContent::Email { .. })
    }

    pub fn email_has_attachment(&self) -> bool {
        matches!(self, EvidenceContent::Email { has_attachment: true, .. })
    }
}

/// Outcome of scoring one action against one piece of evidence.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub confidence: u8,
    pub completes_action: bool,
    pub flags: Vec<String>,
    pub reasoning: String,
    pub source: CompletionSource,
}

impl MatchResult {
    /// Converts a judge-style verdict into a match result.
    pub fn from_confidence(
        confidence: u8,
        reasoning: impl Into<String>,
        source: CompletionSource,
        completion_threshold: u8,
    ) -> Self {
        Self {
            confidence,
            completes_action: confidence >= completion_threshold,
            flags: Vec::new(),
            reasoning: reasoning.into(),
            source,
        }
    }
}

/// Report returned by a broad detection scan, for caller-side logging.
#[derive(Debug, Clone, Default)]
pub struct DetectionReport {
    pub scanned: usize,
    pub completed: usize,
    pub suggested: usize,
    pub skipped: usize,
}

impl DetectionReport {
    pub fn nothing_scanned() -> Self {
        Self::default()
    }
}
