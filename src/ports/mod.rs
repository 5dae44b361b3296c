//! Ports - interfaces between the domain and the outside world.
//!
//! Following hexagonal architecture, adapters implement these traits;
//! the application layer depends only on the traits.
//!
//! ## Read side
//!
//! - `CrmReader` - deal, contact, activity and file lookups
//! - `PlaybookSource` - per-stage key actions
//! - `HealthConfigSource` / `DetectionConfigSource` - per-org tuning
//!
//! ## Write side
//!
//! - `ActionStore` - persisted actions, with a conditional complete
//! - `SuggestionStore` - pending completion suggestions
//!
//! ## AI
//!
//! - `AiProvider` - raw LLM completions
//! - `CompletionJudge` - structured verdicts built on a provider

mod action_store;
mod ai_provider;
mod completion_judge;
mod config_sources;
mod crm_reader;
mod playbook_source;
mod suggestion_store;

pub use action_store::ActionStore;
pub use ai_provider::{AiError, AiProvider, AiRequest, AiResponse};
pub use completion_judge::{CompletionJudge, JudgeRequest, JudgeVerdict};
pub use config_sources::{DetectionConfigSource, HealthConfigSource};
pub use crm_reader::CrmReader;
pub use playbook_source::PlaybookSource;
pub use suggestion_store::SuggestionStore;
