use std::fmt;

use chrono::Duration;

use super::errors::SecretKeyError;

/// Shared secret used to sign and verify tokens.
///
/// Never printed: the `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw key material.
    ///
    /// # Errors
    /// * `Empty` - No key material was supplied
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretKeyError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretKeyError::Empty);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Signing secret and token lifetime, loaded once at startup and passed to
/// every token operation.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: SecretKey,
    pub ttl: Duration,
}

impl TokenSettings {
    /// Lifetime used when none is configured.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    pub fn new(secret: SecretKey, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn with_default_ttl(secret: SecretKey) -> Self {
        Self::new(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }
}
