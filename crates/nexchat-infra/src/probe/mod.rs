//! Outbound liveness probes against chat servers.

pub mod http;
