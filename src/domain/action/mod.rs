//! Action candidates, persisted action records and suggestions.
//!
//! The rules engine emits `ActionCandidate`s; the application layer
//! persists them as `Action` records which the completion detector later
//! mutates. `ActionSuggestion` links one action to one piece of
//! ambiguous evidence awaiting human confirmation.

mod candidate;
mod record;
mod source_rule;
mod suggestion;
mod types;

pub use candidate::ActionCandidate;
pub use record::{Action, CompletionRecord, CompletionSource, EvidenceRef};
pub use source_rule::SourceRule;
pub use suggestion::{ActionSuggestion, SuggestionStatus};
pub use types::{ActionPriority, ActionSource, ActionType, NextStep};
