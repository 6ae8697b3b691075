//! HTTP/REST API layer for NexChat.
//!
//! Axum-based REST API for the chat directory and the sweep trigger, plus the
//! admin console page. Mounted at the root and under `/api`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
