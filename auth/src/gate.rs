use thiserror::Error;

use crate::jwt::SecretKey;
use crate::jwt::TokenClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;

/// Scheme prefix stripped from authorization values.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
        }
    }
}

/// Rejection reasons of the gate.
///
/// Every verification failure shares one message; the underlying kind is kept
/// for diagnostics only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid or expired credential")]
    InvalidCredential(TokenError),
}

impl GateError {
    /// Underlying token failure, if verification was attempted.
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            GateError::MissingCredential => None,
            GateError::InvalidCredential(err) => Some(err),
        }
    }
}

/// Token verification as seen by the gate.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str, secret: &SecretKey) -> Result<TokenClaims, TokenError>;
}

impl TokenVerifier for TokenService {
    fn verify_token(&self, token: &str, secret: &SecretKey) -> Result<TokenClaims, TokenError> {
        self.verify(token, secret)
    }
}

/// Per-request authentication check.
///
/// Takes the raw authorization value of a request and either yields the
/// caller's identity or rejects. One verification per call, nothing cached.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationGate<V = TokenService> {
    verifier: V,
}

impl<V: TokenVerifier> AuthenticationGate<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    /// Authenticate a request from its authorization header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, `None` when the header is absent
    /// * `secret` - Secret the token must be signed with
    ///
    /// # Returns
    /// Identity carried by the token
    ///
    /// # Errors
    /// * `MissingCredential` - No (or a blank) authorization value; the verifier is not called
    /// * `InvalidCredential` - The token is malformed, forged or expired
    pub fn check(
        &self,
        authorization: Option<&str>,
        secret: &SecretKey,
    ) -> Result<Identity, GateError> {
        let value = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(GateError::MissingCredential)?;

        let token = value
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim_start)
            .unwrap_or(value);

        self.verifier
            .verify_token(token, secret)
            .map(Identity::from)
            .map_err(GateError::InvalidCredential)
    }
}
