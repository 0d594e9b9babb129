//! Password hashing for admin credentials.
//!
//! Argon2id with a random salt per hash. Verification goes through
//! `PasswordVerifier`, which compares digests in constant time.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

use branchdesk_core::PasswordHash;

/// Errors from hashing or verifying a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing failed.
    #[error("failed to hash password")]
    Hash,
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,
    /// The password does not match the stored hash.
    #[error("password does not match")]
    Mismatch,
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if the hasher rejects its input.
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|_| PasswordError::Hash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `PasswordError::Mismatch` on a wrong password and
/// `PasswordError::MalformedHash` if the stored value cannot be parsed.
pub fn verify_password(password: &str, hash: &PasswordHash) -> Result<(), PasswordError> {
    let parsed = PhcString::new(hash.as_str()).map_err(|_| PasswordError::MalformedHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}
