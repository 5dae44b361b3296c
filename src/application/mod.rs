//! Application layer - use-case orchestration over the ports.
//!
//! Handlers wire domain logic to the ports: fetch, decide, persist.
//! No business rules live here beyond sequencing and degradation
//! policy; the domain modules own the decisions.

mod completion_detector;
mod context_builder;
mod generate_actions;

pub use completion_detector::{CompletionDetector, EmailSendOutcome};
pub use context_builder::ContextBuilder;
pub use generate_actions::{GenerateActionsCommand, GenerateActionsHandler, GenerateActionsResult};
