//! Password value object - salted Argon2 hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

/// Hash verified when a login names an unknown email, so both failure paths
/// run one Argon2 verification.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash_plain("dummy-password-never-matches").ok());

/// Password value object holding an Argon2 PHC hash string.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new password after checking its length.
    ///
    /// # Errors
    /// Returns `InvalidFormat` if the password is shorter than 6 or longer
    /// than 255 characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let length = plain_text.chars().count() as u64;
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(AppError::invalid_format(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        Self::hash_plain(plain_text)
    }

    /// Hash a password without any length rule (partial updates).
    pub fn hash_plain(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }

    /// Run a verification that always fails, costing the same as a real one.
    pub fn verify_dummy(plain_text: &str) -> bool {
        if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
            dummy.verify(plain_text);
        }
        false
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}
