//! PostgreSQL adapters.
//!
//! Both stores keep the full record as a JSONB payload next to the
//! columns queries filter on. The conditional completion update and
//! the pending-suggestion uniqueness constraint are enforced in SQL,
//! so concurrent detectors resolve without application-level locking.

mod action_store;
mod suggestion_store;

pub use action_store::PostgresActionStore;
pub use suggestion_store::PostgresSuggestionStore;
