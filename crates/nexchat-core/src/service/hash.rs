//! SecretKeyHasher trait for digesting chat secret keys.
//!
//! Defined in nexchat-core so services can derive the stored digest of a key
//! without coupling to a specific hashing algorithm. The `Sha256SecretKeyHasher`
//! adapter lives in nexchat-infra.

/// Abstraction over secret key hashing.
///
/// The record store only ever sees the output of `digest`; presented keys are
/// digested the same way and matched by equality.
pub trait SecretKeyHasher: Send + Sync {
    /// Compute a hex-encoded digest of the given key.
    fn digest(&self, secret_key: &str) -> String;
}
