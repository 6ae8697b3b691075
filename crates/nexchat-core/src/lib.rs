//! Business logic and port definitions for the NexChat directory.
//!
//! This crate defines the "ports" (repository, probe, key traits) that the
//! infrastructure layer implements, plus the use cases built on them: the
//! directory service and the liveness sweeper. It depends only on
//! `nexchat-types` -- never on `nexchat-infra` or any database/IO crate.

pub mod probe;
pub mod repository;
pub mod schedule;
pub mod service;
