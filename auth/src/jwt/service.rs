use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::settings::SecretKey;

/// Token issuance and verification.
///
/// Stateless: the secret is supplied on every call and keys are derived from it
/// per operation, so a verification always uses the secret current at call time.
/// Uses HS256 (HMAC with SHA-256).
#[derive(Debug, Clone)]
pub struct TokenService {
    algorithm: Algorithm,
}

/// A freshly issued token together with the claims it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    token: String,
    claims: TokenClaims,
}

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}

impl TokenService {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for `subject` valid for `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Opaque subject identifier
    /// * `email` - Email claim
    /// * `secret` - Signing secret
    /// * `ttl` - Token lifetime; zero or negative values produce expired tokens
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be built or signed
    pub fn issue(
        &self,
        subject: &str,
        email: &str,
        secret: &SecretKey,
        ttl: Duration,
    ) -> Result<SignedToken, TokenError> {
        let claims = TokenClaims::new(subject, email, Utc::now(), ttl)?;
        let header = Header::new(self.algorithm);

        let token = encode(&header, &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(SignedToken { token, claims })
    }

    /// Parse a token, check its signature against `secret`, then its expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed, uses another algorithm or lacks claims
    /// * `BadSignature` - Signature does not match `secret`
    /// * `Expired` - Signature is valid but the current time is at or past `exp`
    pub fn verify(&self, token: &str, secret: &SecretKey) -> Result<TokenClaims, TokenError> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &self.validation(),
        )?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is enforced in `verify` without leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}
