//! SHA-256 digests of chat secret keys.
//!
//! Implements the `SecretKeyHasher` trait from `nexchat-core` using the
//! `sha2` crate (RustCrypto ecosystem).

use sha2::{Digest, Sha256};

use nexchat_core::service::hash::SecretKeyHasher;

/// SHA-256 implementation of `SecretKeyHasher`.
///
/// Produces lowercase hex-encoded digests. Only these digests reach the
/// database; a presented key is digested the same way and matched by equality.
#[derive(Debug, Clone, Copy)]
pub struct Sha256SecretKeyHasher;

impl Sha256SecretKeyHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256SecretKeyHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretKeyHasher for Sha256SecretKeyHasher {
    fn digest(&self, secret_key: &str) -> String {
        let digest = Sha256::digest(secret_key.as_bytes());
        format!("{:x}", digest)
    }
}
