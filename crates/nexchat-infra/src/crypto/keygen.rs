//! Secret key generation from the operating system's CSPRNG.

use std::fmt::Write;

use rand::RngCore;
use rand::rngs::OsRng;

use nexchat_core::service::keygen::KeyGenerator;
use nexchat_types::chat::SecretKey;

/// Bytes of entropy per key. Hex-encoded this gives 64 characters.
const KEY_BYTES: usize = 32;

/// Issues 256-bit secret keys from `OsRng`, hex-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngKeyGenerator;

impl OsRngKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyGenerator for OsRngKeyGenerator {
    fn generate(&self) -> SecretKey {
        let mut bytes = [0u8; KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let mut hex = String::with_capacity(KEY_BYTES * 2);
        for byte in bytes {
            // Writing to a String cannot fail.
            let _ = write!(hex, "{byte:02x}");
        }
        SecretKey::new(hex)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_key_is_64_lowercase_hex_chars() {
        let key = OsRngKeyGenerator::new().generate();
        assert_eq!(key.expose().len(), 64);
        assert!(
            key.expose()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_keys_are_unique() {
        let generator = OsRngKeyGenerator::new();
        let keys: HashSet<String> = (0..1000)
            .map(|_| generator.generate().expose().to_string())
            .collect();
        assert_eq!(keys.len(), 1000);
    }
}
