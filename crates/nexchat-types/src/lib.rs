//! Shared domain types for the NexChat directory.
//!
//! This crate contains the core domain types used across the workspace:
//! chat records, secret keys, pagination, sweep summaries, configuration and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod sweep;
