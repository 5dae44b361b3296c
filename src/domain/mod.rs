//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `crm` - Deal, account, contact, meeting, email and file records
//! - `health` - Health-score breakdown consumed by the rules engine
//! - `action` - Action candidates, persisted actions and suggestions
//! - `context` - Per-deal context snapshot and derived signals
//! - `playbook` - Pure classification helpers for playbook key-actions
//! - `rules` - Deterministic action-generation rule groups
//! - `next_step` - Communication-channel resolution for actions
//! - `detection` - Completion-detection scoring and configuration

pub mod action;
pub mod context;
pub mod crm;
pub mod detection;
pub mod foundation;
pub mod health;
pub mod next_step;
pub mod playbook;
pub mod rules;
