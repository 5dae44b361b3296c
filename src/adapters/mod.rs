//! Adapters - implementations of the ports.
//!
//! - `memory` - in-process implementations for tests and development
//! - `postgres` - sqlx-backed stores
//! - `ai` - LLM provider and the completion judge built on it

pub mod ai;
pub mod memory;
pub mod postgres;
