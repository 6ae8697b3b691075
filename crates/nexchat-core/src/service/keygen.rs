//! KeyGenerator trait for issuing chat secret keys.

use nexchat_types::chat::SecretKey;

/// Source of fresh secret keys. Implementations must provide at least 256
/// bits of entropy per key.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> SecretKey;
}
