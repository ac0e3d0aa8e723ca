use jsonwebtoken::errors::Error as JwtLibError;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures keep their kind so callers can tell an expired token
/// from a forged or garbled one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}

impl TokenError {
    /// Short machine-readable name of the failure kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::EncodingFailed(_) => "encoding_failed",
            TokenError::Malformed(_) => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::Expired => "expired",
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

impl From<JwtLibError> for TokenError {
    fn from(err: JwtLibError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Error for secret key construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretKeyError {
    #[error("Secret key must not be empty")]
    Empty,
}
