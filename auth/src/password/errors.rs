use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Salt generation or the hash computation itself failed.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed or checked.
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
