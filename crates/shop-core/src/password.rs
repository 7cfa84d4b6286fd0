//! # Password Hashing
//!
//! Argon2id hashing with a per-call random salt embedded in the PHC output
//! string, so no separate salt storage is needed. Verification is
//! constant-time with respect to the candidate password.

use crate::error::{ShopError, ShopResult};
use argon2::{
    password_hash::{rand_core::OsRng, Error as HashError, PasswordHash, SaltString},
    Argon2, PasswordHasher as _, PasswordVerifier as _,
};

/// One-way, salted, memory-hard password hasher (Argon2id)
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password into a self-describing PHC string.
    pub fn hash(&self, plaintext: &str) -> ShopResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ShopError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// Returns `Ok(false)` for a wrong password. A stored value that does
    /// not parse as a PHC string is a corrupt record, reported as
    /// `ShopError::HashFormat` so callers can log it separately from an
    /// ordinary failed login.
    pub fn verify(&self, stored: &str, plaintext: &str) -> ShopResult<bool> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| ShopError::HashFormat(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(ShopError::HashFormat(e.to_string())),
        }
    }
}
