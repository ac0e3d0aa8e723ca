use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity claims carried by an access token.
///
/// Timestamps are Unix seconds, matching the registered `iat`/`exp` claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier, opaque string)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims issued at `issued_at` and valid for `ttl`.
    ///
    /// `ttl` is taken literally: zero or negative durations yield claims that
    /// are already expired.
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at + ttl` is outside the representable range
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            sub: subject.into(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is only valid while the current time is strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let now = Utc::now();
        let claims = TokenClaims::new("42", "a@b.com", now, Duration::minutes(15)).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_negative_ttl_is_kept() {
        let now = Utc::now();
        let claims = TokenClaims::new("42", "a@b.com", now, Duration::minutes(-1)).unwrap();

        assert_eq!(claims.exp - claims.iat, -60);
        assert!(claims.is_expired(now.timestamp()));
    }

    #[test]
    fn test_is_expired() {
        let claims = TokenClaims {
            sub: "42".to_string(),
            email: "a@b.com".to_string(),
            iat: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_ttl_overflow() {
        let result = TokenClaims::new("42", "a@b.com", Utc::now(), Duration::days(1_000_000_000));
        assert!(matches!(result, Err(TokenError::EncodingFailed(_))));
    }

    #[test]
    fn test_timestamps_as_datetimes() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new("42", "a@b.com", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.issued_at(), Some(now));
        assert_eq!(claims.expires_at(), Some(now + Duration::hours(24)));
    }
}
