//! In-memory adapters.
//!
//! Back every port with process-local maps. Used by the handler tests
//! and handy for development wiring; none of this touches a database.

mod configs;
mod crm;
mod stores;

pub use configs::{
    InMemoryDetectionConfigSource, InMemoryHealthConfigSource, InMemoryPlaybookSource,
};
pub use crm::InMemoryCrm;
pub use stores::{InMemoryActionStore, InMemorySuggestionStore};
