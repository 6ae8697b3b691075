//! Infrastructure layer for the NexChat directory.
//!
//! Contains implementations of the ports defined in `nexchat-core`:
//! SQLite storage, the HTTP liveness probe, secret key generation and
//! hashing, plus the configuration loader.

pub mod config;
pub mod crypto;
pub mod probe;
pub mod sqlite;
