use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed hash with the default parameters that no real password produces.
///
/// Verified against when the account does not exist so the request pays the
/// same cost as a wrong password.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dWFtLWRlY295LXNhbHQxNg$Xym9NuaaDxZPlh4lUJia3PcQkQsYrqfnY3Ql2MRp+Tw";

/// Password hashing implementation.
///
/// Argon2id with the crate's default cost parameters. Hashes are PHC strings,
/// so the algorithm, parameters and salt travel with every stored value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The hash is recomputed with the salt and parameters embedded in `hash`
    /// and compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// A hash that cannot be parsed still costs one full verification.
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or cannot be checked
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                // Pay the full cost before reporting the corrupt hash.
                self.verify_unknown_user(password);
                return Err(PasswordError::VerificationFailed(format!(
                    "Invalid password hash: {}",
                    e
                )));
            }
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }

    /// Spend a full verification on a password for an account that does not exist.
    ///
    /// Always returns false.
    pub fn verify_unknown_user(&self, password: &str) -> bool {
        // The decoy never matches; the result only matters for its cost.
        let _ = self.verify(password, DECOY_HASH);
        false
    }
}
