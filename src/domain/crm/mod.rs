//! CRM records the engine reads.
//!
//! These are the row shapes handed over by the persistence collaborator.
//! The engine treats them as immutable input; only actions and
//! suggestions are ever written back.

mod contact;
mod deal;
mod email;
mod file;
mod meeting;

pub use contact::{Contact, ContactRole};
pub use deal::{Account, Deal, DealStage};
pub use email::{Email, EmailDirection};
pub use file::{DealFile, FileStatus};
pub use meeting::{Meeting, MeetingStatus};
