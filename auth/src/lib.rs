//! Credential core for user access management
//!
//! Provides the authentication building blocks used by the service:
//! - Password hashing (Argon2id)
//! - Signed, expiring identity tokens (JWT, HS256)
//! - The request authentication gate
//! - Login coordination
//!
//! Nothing here holds configuration. The signing secret and token lifetime are
//! passed to every call.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SecretKey, TokenError, TokenService};
//! use chrono::Duration;
//!
//! let secret = SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let service = TokenService::new();
//!
//! let token = service.issue("42", "a@b.com", &secret, Duration::minutes(15)).unwrap();
//! let claims = service.verify(token.as_str(), &secret).unwrap();
//! assert_eq!(claims.sub, "42");
//!
//! let expired = service.issue("42", "a@b.com", &secret, Duration::minutes(-1)).unwrap();
//! assert_eq!(service.verify(expired.as_str(), &secret), Err(TokenError::Expired));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthenticationGate, Authenticator, SecretKey, TokenSettings};
//!
//! let settings = TokenSettings::with_default_ttl(
//!     SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap(),
//! );
//! let auth = Authenticator::new();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", Some(&hash), "42", "alice@example.com", &settings)
//!     .unwrap();
//!
//! // Protected request: check the authorization header
//! let gate: AuthenticationGate = AuthenticationGate::default();
//! let header = format!("Bearer {}", result.access_token);
//! let identity = gate.check(Some(&header), &settings.secret).unwrap();
//! assert_eq!(identity.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthenticationGate;
pub use gate::GateError;
pub use gate::Identity;
pub use gate::TokenVerifier;
pub use jwt::SecretKey;
pub use jwt::SignedToken;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
