//! Password hashing
//!
//! Argon2id with default parameters and a fresh random salt per hash,
//! stored as a PHC string so parameters travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use userctl_core_types::Sensitive;

use crate::errors::{Result, UserError};

/// Hash a clear-text password into a PHC string
pub fn hash_password(password: &Sensitive<String>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHash {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(hash)
}

/// Check a clear-text password against a stored PHC string
///
/// A wrong password is `Ok(false)`; a malformed hash is an error.
pub fn verify_password(password: &Sensitive<String>, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash {
        reason: e.to_string(),
    })?;

    Ok(Argon2::default()
        .verify_password(password.expose().as_bytes(), &parsed)
        .is_ok())
}
