//! DealCompass - Next-action engine for a sales CRM.
//!
//! This crate derives prioritized recommended actions from the full state
//! of a sales deal and later verifies, via rule heuristics and/or an LLM
//! content check, whether a sent email or held meeting actually satisfied
//! one of those actions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
