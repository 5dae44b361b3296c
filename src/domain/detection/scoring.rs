//! Rules-based completion scoring.
//!
//! Pure function of an open action and one piece of evidence. The
//! weights below are calibrated values; changing any of them shifts
//! completion behavior across every org.

use once_cell::sync::Lazy;

use crate::domain::action::{Action, ActionType, CompletionSource, NextStep};

use super::{EvidenceContent, MatchResult};

/// Rules score at or above this completes the action outright.
pub const RULES_COMPLETE_THRESHOLD: u8 = 60;

/// Hybrid mode trusts the rules score outside this band and asks the
/// LLM to arbitrate inside it.
pub const HYBRID_LOW: u8 = 40;
pub const HYBRID_HIGH: u8 = 90;

/// Targeted per-action LLM check completes at or above this.
pub const TARGETED_AI_THRESHOLD: u8 = 75;

/// Confidence assigned when an action has no suggested-action text to
/// compare against, so the semantic check is skipped.
pub const NO_SUGGESTION_CONFIDENCE: u8 = 80;

/// Confidence assigned when the AI provider is unavailable and the
/// targeted path falls back to completing anyway.
pub const AI_UNAVAILABLE_CONFIDENCE: u8 = 70;

const KEYWORD_WEIGHT: f64 = 30.0;
const ATTACHMENT_BONUS: i32 = 20;
const EXTERNAL_EVIDENCE_WEIGHT: i32 = 20;
const CHANNEL_MATCH_BONUS: i32 = 15;
const NEGATION_PENALTY: i32 = 15;
const NO_NEGATION_BONUS: i32 = 5;

/// Phrases that signal the evidence talks about doing the thing rather
/// than having done it.
static NEGATION_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec!["discuss", "planning", "thinking about", "considering", "not yet", "prepare to"]
});

/// Scores one action against one piece of evidence.
pub fn score(action: &Action, evidence: &EvidenceContent) -> MatchResult {
    let text = evidence.text().to_lowercase();
    let mut raw: i32 = 0;
    let mut flags = Vec::new();
    let mut notes = Vec::new();

    if !action.keywords.is_empty() {
        let matched = action
            .keywords
            .iter()
            .filter(|k| text.contains(&k.to_lowercase()))
            .count();
        let fraction = matched as f64 / action.keywords.len() as f64;
        raw += (KEYWORD_WEIGHT * fraction).round() as i32;
        notes.push(format!("{}/{} keywords matched", matched, action.keywords.len()));
    }

    if action.action_type == ActionType::EmailSend && evidence.email_has_attachment() {
        raw += ATTACHMENT_BONUS;
        notes.push("attachment present".to_string());
    }

    if evidence.is_sent_email() {
        raw += EXTERNAL_EVIDENCE_WEIGHT;
        notes.push("outbound email".to_string());
    } else if evidence.is_email() && action.requires_external_evidence {
        raw -= EXTERNAL_EVIDENCE_WEIGHT;
        flags.push("internal_only".to_string());
        notes.push("inbound email cannot satisfy an outreach action".to_string());
    }

    if channel_matches(action, evidence) {
        raw += CHANNEL_MATCH_BONUS;
        notes.push("channel matches".to_string());
    }

    if NEGATION_WORDS.iter().any(|w| text.contains(w)) {
        raw -= NEGATION_PENALTY;
        flags.push("negation_detected".to_string());
        notes.push("intent language detected".to_string());
    } else {
        raw += NO_NEGATION_BONUS;
    }

    let confidence = clamp_score(raw);
    MatchResult {
        confidence,
        completes_action: confidence >= RULES_COMPLETE_THRESHOLD,
        flags,
        reasoning: notes.join("; "),
        source: CompletionSource::Rules,
    }
}

/// Whether the hybrid mode should hand this rules score to the LLM for
/// arbitration instead of trusting it outright.
pub fn needs_arbitration(rules_confidence: u8) -> bool {
    (HYBRID_LOW..=HYBRID_HIGH).contains(&rules_confidence)
}

fn channel_matches(action: &Action, evidence: &EvidenceContent) -> bool {
    match evidence {
        EvidenceContent::Email { .. } => action.next_step == NextStep::Email,
        EvidenceContent::Meeting { .. } => action.action_type == ActionType::MeetingSchedule,
    }
}

fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}
