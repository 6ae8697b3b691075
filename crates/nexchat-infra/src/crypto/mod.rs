//! Cryptographic operations for NexChat.
//!
//! - `hash`: SHA-256 digests of chat secret keys
//! - `keygen`: OS-random secret key generation

pub mod hash;
pub mod keygen;
