//! Shared domain primitives.
//!
//! Value objects, strongly-typed identifiers, the domain error type and
//! the tenancy scope used on every port call.

mod errors;
mod ids;
mod scope;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{
    AccountId, ActionId, ContactId, DealId, EmailId, FileId, MeetingId, OrgId, SuggestionId,
    UserId,
};
pub use scope::{OwnerScope, ScopedRecord};
pub use timestamp::Timestamp;
