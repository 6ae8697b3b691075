//! Bearer credential check for externally triggered sweeps.
//!
//! The scheduler that triggers `/cron` presents `Authorization: Bearer <secret>`.
//! With no secret configured every invocation is rejected.

use nexchat_types::error::SweepError;

#[derive(Clone)]
pub struct CronAuthorizer {
    secret: Option<String>,
}

impl CronAuthorizer {
    pub fn new(secret: Option<String>) -> Self {
        // An empty secret would accept "Bearer " and is treated as unset.
        let secret = secret.filter(|s| !s.is_empty());
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a raw `Authorization` header value.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), SweepError> {
        let expected = self.secret.as_deref().ok_or(SweepError::Unauthorized)?;
        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(SweepError::Unauthorized)?;

        if constant_time_eq(token.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            Err(SweepError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for CronAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronAuthorizer")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Byte comparison whose duration does not depend on where inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
