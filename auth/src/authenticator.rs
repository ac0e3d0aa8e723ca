use chrono::DateTime;
use chrono::Utc;

use crate::jwt::SecretKey;
use crate::jwt::SignedToken;
use crate::jwt::TokenClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::jwt::TokenSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no key material; token settings are passed to each call.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// An account that does not exist (`stored_hash` is `None`) costs a full
    /// verification and fails exactly like a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash of the account, if it exists
    /// * `subject` - Subject identifier to put in the token
    /// * `email` - Email claim to put in the token
    /// * `settings` - Signing secret and token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
        email: &str,
        settings: &TokenSettings,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => self.password_hasher.verify_unknown_user(password),
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.generate_token(subject, email, settings)?;
        let expires_at = token.expires_at().ok_or_else(|| {
            TokenError::EncodingFailed("token expiry is out of range".to_string())
        })?;

        Ok(AuthenticationResult {
            access_token: token.into_string(),
            expires_at,
        })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn generate_token(
        &self,
        subject: &str,
        email: &str,
        settings: &TokenSettings,
    ) -> Result<SignedToken, TokenError> {
        self.token_service
            .issue(subject, email, &settings.secret, settings.ttl)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `Malformed`, `BadSignature` or `Expired` - see [`TokenService::verify`]
    pub fn validate_token(
        &self,
        token: &str,
        secret: &SecretKey,
    ) -> Result<TokenClaims, TokenError> {
        self.token_service.verify(token, secret)
    }
}
